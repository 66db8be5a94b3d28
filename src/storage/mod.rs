// Catalog - Genre, Author and Book catalog backend
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Database storage and models
//!
//! This module handles all database operations using SQLite through sqlx.
//!
//! # Database Schema
//! - Genres: named categories (name only, store-assigned id)
//! - Authors: author names and life dates
//! - Books: title/summary/isbn with optional author and genre references
//!
//! # Usage Example
//! ```no_run
//! use catalog_core::storage::{Database, queries, models::{NewBook, NewGenre}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./catalog.db").await?;
//!
//! let genre = queries::insert_genre(db.pool(), &NewGenre::new("Fantasy")).await?;
//! queries::insert_book(db.pool(), &NewBook::new("The Hobbit").in_genre(genre.id)).await?;
//!
//! let books = queries::find_books_by_genre(db.pool(), genre.id).await?;
//! assert_eq!(books.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

// Re-export commonly used types
pub use database::Database;
pub use models::{
    Author, AuthorId, Book, BookId, Genre, GenreId, NewAuthor, NewBook, NewGenre,
    GENRE_LIST_URL,
};
pub use store::CatalogStore;
