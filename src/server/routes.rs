//! HTTP handlers for the genre pages.
//!
//! Each handler only extracts request data and delegates to
//! [`GenreController`]; the returned `Outcome` or error becomes the response.
//!
//! Ids are taken from the path as text. One that is not a valid genre id
//! names no record, so it gets the same answer as an unknown number.

use axum::{
    extract::{Path, State},
    Form,
};

use crate::catalog::genre::{GenreController, GenreForm};
use crate::catalog::view::Outcome;
use crate::error::{CatalogError, Result};
use crate::storage::models::{GenreId, GENRE_LIST_URL};
use crate::storage::store::CatalogStore;

fn parse_genre_id(raw: &str) -> Option<GenreId> {
    raw.parse().ok()
}

fn require_genre_id(raw: &str) -> Result<GenreId> {
    parse_genre_id(raw).ok_or_else(|| CatalogError::not_found("Genre"))
}

pub async fn genre_list<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
) -> Result<Outcome> {
    genres.list().await
}

pub async fn genre_detail<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Path(id): Path<String>,
) -> Result<Outcome> {
    genres.detail(require_genre_id(&id)?).await
}

pub async fn genre_create_get<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
) -> Outcome {
    genres.create_get()
}

pub async fn genre_create_post<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Form(form): Form<GenreForm>,
) -> Result<Outcome> {
    genres.create_post(form).await
}

pub async fn genre_delete_get<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Path(id): Path<String>,
) -> Result<Outcome> {
    match parse_genre_id(&id) {
        Some(id) => genres.delete_get(id).await,
        None => Ok(Outcome::redirect(GENRE_LIST_URL)),
    }
}

pub async fn genre_delete_post<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Path(id): Path<String>,
) -> Result<Outcome> {
    match parse_genre_id(&id) {
        Some(id) => genres.delete_post(id).await,
        None => Ok(Outcome::redirect(GENRE_LIST_URL)),
    }
}

pub async fn genre_update_get<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Path(id): Path<String>,
) -> Result<Outcome> {
    genres.update_get(require_genre_id(&id)?).await
}

pub async fn genre_update_post<S: CatalogStore>(
    State(genres): State<GenreController<S>>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> Result<Outcome> {
    genres.update_post(require_genre_id(&id)?, form).await
}
