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


//! Database models for the catalog
//!
//! Plain records mapped from SQLite rows with sqlx, plus the stateless
//! derivation functions (canonical URLs, display names, formatted dates)
//! computed from them.
//!
//! # SQLite Adaptations
//! - Identifiers are `INTEGER PRIMARY KEY AUTOINCREMENT` row ids
//! - Dates stored as TEXT in ISO 8601 format (YYYY-MM-DD)
//! - A book references at most one genre and at most one author

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned genre identifier, immutable after creation
pub type GenreId = i64;
/// Store-assigned book identifier
pub type BookId = i64;
/// Store-assigned author identifier
pub type AuthorId = i64;

/// Location of the genre list view
pub const GENRE_LIST_URL: &str = "/catalog/genres";

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// Named category of books
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Genre {
    #[sqlx(rename = "genre_id")]
    pub id: GenreId,
    pub name: String,
}

/// Book record (read-only from the genre flows)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Book {
    #[sqlx(rename = "book_id")]
    pub id: BookId,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    #[sqlx(default)]
    pub author_id: Option<AuthorId>,
    #[sqlx(default)]
    pub genre_id: Option<GenreId>,
}

/// Book author
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Author {
    #[sqlx(rename = "author_id")]
    pub id: AuthorId,
    pub first_name: String,
    pub family_name: String,
    #[sqlx(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[sqlx(default)]
    pub date_of_death: Option<NaiveDate>,
}

// ============================================================================
// NEW RECORD STRUCTS (for inserts)
// ============================================================================

/// New genre record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// New book record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<AuthorId>,
    pub genre_id: Option<GenreId>,
}

impl NewBook {
    /// Create a book with only a title; other fields can be set afterwards
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: String::new(),
            isbn: String::new(),
            author_id: None,
            genre_id: None,
        }
    }

    pub fn in_genre(mut self, genre_id: GenreId) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    pub fn by_author(mut self, author_id: AuthorId) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

/// New author record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

// ============================================================================
// DERIVED FIELDS
// ============================================================================

/// Canonical location of a genre, stable for the record's lifetime
pub fn genre_url(id: GenreId) -> String {
    format!("/catalog/genre/{}", id)
}

/// Canonical location of a book
pub fn book_url(id: BookId) -> String {
    format!("/catalog/book/{}", id)
}

/// Canonical location of an author
pub fn author_url(id: AuthorId) -> String {
    format!("/catalog/author/{}", id)
}

/// Display name in "first, family" form
///
/// Empty unless both name parts are present.
pub fn author_full_name(author: &Author) -> String {
    if author.first_name.is_empty() || author.family_name.is_empty() {
        return String::new();
    }
    format!("{}, {}", author.first_name, author.family_name)
}

/// Birth and death years, e.g. "1892 - 1973" or "1947 - "
pub fn author_lifespan(author: &Author) -> String {
    let birth = author
        .date_of_birth
        .map(|d| d.year().to_string())
        .unwrap_or_default();
    let death = author
        .date_of_death
        .map(|d| d.year().to_string())
        .unwrap_or_default();
    format!("{} - {}", birth, death)
}

/// Medium-length display date, e.g. "Jan 3, 1892"
pub fn format_date_medium(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Date as accepted by an HTML date input, e.g. "1892-01-03"
pub fn format_date_html(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tolkien() -> Author {
        Author {
            id: 7,
            first_name: "John".to_string(),
            family_name: "Tolkien".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: NaiveDate::from_ymd_opt(1973, 9, 2),
        }
    }

    #[test]
    fn test_canonical_urls() {
        assert_eq!(genre_url(12), "/catalog/genre/12");
        assert_eq!(book_url(3), "/catalog/book/3");
        assert_eq!(author_url(7), "/catalog/author/7");
    }

    #[test]
    fn test_author_full_name() {
        let mut author = tolkien();
        assert_eq!(author_full_name(&author), "John, Tolkien");

        author.family_name.clear();
        assert_eq!(author_full_name(&author), "");
    }

    #[test]
    fn test_author_lifespan() {
        let mut author = tolkien();
        assert_eq!(author_lifespan(&author), "1892 - 1973");

        author.date_of_death = None;
        assert_eq!(author_lifespan(&author), "1892 - ");

        author.date_of_birth = None;
        assert_eq!(author_lifespan(&author), " - ");
    }

    #[test]
    fn test_date_formatting() {
        let author = tolkien();
        assert_eq!(format_date_medium(author.date_of_birth), "Jan 3, 1892");
        assert_eq!(format_date_html(author.date_of_death), "1973-09-02");
        assert_eq!(format_date_medium(None), "");
        assert_eq!(format_date_html(None), "");
    }
}
