//! Entity store seam used by the catalog controllers.
//!
//! The controller only ever needs a handful of single-document primitives,
//! so they are expressed as a trait. `Database` implements it on top of
//! `queries`; tests can substitute a store that fails on demand.

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::database::Database;
use crate::storage::models::{Book, Genre, GenreId, NewGenre};
use crate::storage::queries;

/// Store primitives for genres and the books that reference them.
///
/// Every method is atomic on its own; there is no multi-call transaction.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All genres sorted by name.
    async fn list_genres(&self) -> Result<Vec<Genre>>;

    async fn find_genre_by_id(&self, id: GenreId) -> Result<Option<Genre>>;

    /// First genre whose name matches exactly.
    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>>;

    /// Persist a new genre and return it with its assigned id.
    async fn insert_genre(&self, genre: &NewGenre) -> Result<Genre>;

    /// Rename a genre in place. `None` if nothing is stored at `id`.
    async fn update_genre_name(&self, id: GenreId, name: &str) -> Result<Option<Genre>>;

    /// Remove a genre. `false` if nothing was stored at `id`.
    async fn delete_genre(&self, id: GenreId) -> Result<bool>;

    /// Books whose genre reference equals `id`.
    async fn find_books_by_genre(&self, id: GenreId) -> Result<Vec<Book>>;
}

#[async_trait]
impl CatalogStore for Database {
    async fn list_genres(&self) -> Result<Vec<Genre>> {
        queries::list_genres(self.pool()).await
    }

    async fn find_genre_by_id(&self, id: GenreId) -> Result<Option<Genre>> {
        queries::find_genre_by_id(self.pool(), id).await
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        queries::find_genre_by_name(self.pool(), name).await
    }

    async fn insert_genre(&self, genre: &NewGenre) -> Result<Genre> {
        queries::insert_genre(self.pool(), genre).await
    }

    async fn update_genre_name(&self, id: GenreId, name: &str) -> Result<Option<Genre>> {
        queries::update_genre_name(self.pool(), id, name).await
    }

    async fn delete_genre(&self, id: GenreId) -> Result<bool> {
        queries::delete_genre(self.pool(), id).await
    }

    async fn find_books_by_genre(&self, id: GenreId) -> Result<Vec<Book>> {
        queries::find_books_by_genre(self.pool(), id).await
    }
}
