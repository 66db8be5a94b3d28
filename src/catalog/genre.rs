//! Genre controller
//!
//! List, detail, create, delete and update flows for genres. Each operation
//! takes already-parsed request data and returns an [`Outcome`], or an error
//! for the generic handler.
//!
//! # Rules
//! - Creating a genre whose exact name already exists redirects to the
//!   existing record instead of inserting a duplicate.
//! - Renaming through update performs no uniqueness check, so two genres
//!   may end up sharing a name.
//! - A genre is only deleted when no book references it. The reference
//!   check and the delete are separate store calls; a book inserted in
//!   between is caught by the store's foreign key and surfaces as a
//!   store error.
//! - Detail and update on a missing genre are `GenreNotFound`. Delete on a
//!   missing genre redirects to the list: there is nothing left to delete.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::fanout;
use crate::catalog::sanitize::{
    sanitize_genre_name, FieldError, CREATE_NAME_REQUIRED, UPDATE_NAME_REQUIRED,
};
use crate::catalog::view::{
    self, GenreFormValue, Outcome, View, ViewData, GENRE_DELETE_TEMPLATE,
    GENRE_DETAIL_TEMPLATE, GENRE_FORM_TEMPLATE, GENRE_LIST_TEMPLATE,
};
use crate::error::{CatalogError, Result};
use crate::storage::models::{genre_url, Book, Genre, GenreId, NewGenre, GENRE_LIST_URL};
use crate::storage::store::CatalogStore;

const LIST_TITLE: &str = "Genre List";
const DETAIL_TITLE: &str = "Genre Detail";
const CREATE_TITLE: &str = "Create Genre";
const UPDATE_TITLE: &str = "Update Genre";
const DELETE_TITLE: &str = "Delete Genre";

/// Submitted genre form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

impl GenreForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Genre operations over any [`CatalogStore`]
#[derive(Debug)]
pub struct GenreController<S> {
    store: Arc<S>,
}

impl<S> Clone for GenreController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CatalogStore> GenreController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All genres, sorted by name
    pub async fn list(&self) -> Result<Outcome> {
        let genres = self.store.list_genres().await?;
        debug!(count = genres.len(), "listing genres");

        Ok(render(
            GENRE_LIST_TEMPLATE,
            LIST_TITLE,
            ViewData::GenreList {
                genre_list: genres.into_iter().map(Into::into).collect(),
            },
        ))
    }

    /// One genre together with the books filed under it
    pub async fn detail(&self, id: GenreId) -> Result<Outcome> {
        let (genre, books) = self.genre_with_books(id).await?;
        let Some(genre) = genre else {
            warn!(genre_id = id, "genre not found");
            return Err(CatalogError::GenreNotFound(id));
        };

        Ok(render(
            GENRE_DETAIL_TEMPLATE,
            DETAIL_TITLE,
            ViewData::GenreDetail {
                genre: genre.into(),
                genre_books: view::books(books),
            },
        ))
    }

    /// Empty create form
    pub fn create_get(&self) -> Outcome {
        render(
            GENRE_FORM_TEMPLATE,
            CREATE_TITLE,
            ViewData::GenreForm {
                genre: None,
                errors: Vec::new(),
            },
        )
    }

    /// Create a genre, or point at the one that already has this name
    pub async fn create_post(&self, form: GenreForm) -> Result<Outcome> {
        let name = match sanitize_genre_name(&form.name, CREATE_NAME_REQUIRED) {
            Ok(name) => name,
            Err(invalid) => {
                debug!(errors = invalid.errors.len(), "create form rejected");
                return Ok(render(
                    GENRE_FORM_TEMPLATE,
                    CREATE_TITLE,
                    ViewData::GenreForm {
                        genre: Some(GenreFormValue {
                            id: None,
                            name: invalid.value,
                        }),
                        errors: invalid.errors,
                    },
                ));
            }
        };

        if let Some(existing) = self.store.find_genre_by_name(name.as_str()).await? {
            debug!(genre_id = existing.id, "genre name already exists");
            return Ok(Outcome::redirect(genre_url(existing.id)));
        }

        let genre = self
            .store
            .insert_genre(&NewGenre::new(name.into_inner()))
            .await?;
        info!(genre_id = genre.id, name = %genre.name, "genre created");

        Ok(Outcome::redirect(genre_url(genre.id)))
    }

    /// Delete confirmation, listing any books that block the deletion
    pub async fn delete_get(&self, id: GenreId) -> Result<Outcome> {
        let (genre, books) = self.genre_with_books(id).await?;
        let Some(genre) = genre else {
            debug!(genre_id = id, "delete requested for missing genre");
            return Ok(Outcome::redirect(GENRE_LIST_URL));
        };

        Ok(delete_view(genre, books))
    }

    /// Delete a genre unless books still reference it
    pub async fn delete_post(&self, id: GenreId) -> Result<Outcome> {
        let (genre, books) = self.genre_with_books(id).await?;
        let Some(genre) = genre else {
            debug!(genre_id = id, "delete requested for missing genre");
            return Ok(Outcome::redirect(GENRE_LIST_URL));
        };

        if !books.is_empty() {
            warn!(
                genre_id = id,
                books = books.len(),
                "genre still referenced, not deleting"
            );
            return Ok(delete_view(genre, books));
        }

        self.store.delete_genre(id).await?;
        info!(genre_id = id, "genre deleted");

        Ok(Outcome::redirect(GENRE_LIST_URL))
    }

    /// Edit form pre-filled with the stored genre
    pub async fn update_get(&self, id: GenreId) -> Result<Outcome> {
        let genre = self.require_genre(id).await?;

        Ok(update_form(genre, Vec::new()))
    }

    /// Rename a genre in place
    ///
    /// On invalid input the form is re-rendered with the currently stored
    /// name; the rejected submission is not echoed back.
    pub async fn update_post(&self, id: GenreId, form: GenreForm) -> Result<Outcome> {
        let name = match sanitize_genre_name(&form.name, UPDATE_NAME_REQUIRED) {
            Ok(name) => name,
            Err(invalid) => {
                debug!(genre_id = id, "update form rejected");
                let stored = self.require_genre(id).await?;
                return Ok(update_form(stored, invalid.errors));
            }
        };

        let Some(genre) = self.store.update_genre_name(id, name.as_str()).await? else {
            warn!(genre_id = id, "genre vanished before update");
            return Err(CatalogError::GenreNotFound(id));
        };
        info!(genre_id = genre.id, name = %genre.name, "genre updated");

        Ok(Outcome::redirect(genre_url(genre.id)))
    }

    async fn require_genre(&self, id: GenreId) -> Result<Genre> {
        self.store
            .find_genre_by_id(id)
            .await?
            .ok_or(CatalogError::GenreNotFound(id))
    }

    async fn genre_with_books(&self, id: GenreId) -> Result<(Option<Genre>, Vec<Book>)> {
        fanout::join(
            self.store.find_genre_by_id(id),
            self.store.find_books_by_genre(id),
        )
        .await
    }
}

fn render(template: &'static str, title: &'static str, data: ViewData) -> Outcome {
    Outcome::Render(View {
        template,
        title,
        data,
    })
}

fn delete_view(genre: Genre, books: Vec<Book>) -> Outcome {
    render(
        GENRE_DELETE_TEMPLATE,
        DELETE_TITLE,
        ViewData::GenreDelete {
            genre: genre.into(),
            genre_books: view::books(books),
        },
    )
}

fn update_form(genre: Genre, errors: Vec<FieldError>) -> Outcome {
    render(
        GENRE_FORM_TEMPLATE,
        UPDATE_TITLE,
        ViewData::GenreForm {
            genre: Some(genre.into()),
            errors,
        },
    )
}
