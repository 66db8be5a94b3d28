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


//! Database query functions
//!
//! # Query Patterns
//! - One function per store primitive, grouped by entity
//! - Async/await for all database operations
//! - Every write is a single statement, so a failure never leaves a
//!   half-written record behind

use crate::error::Result;
use crate::storage::models::*;
use sqlx::SqlitePool;

// ============================================================================
// GENRE QUERIES
// ============================================================================

/// List all genres ordered by name
///
/// Uses SQLite's default BINARY collation, so ordering is case-sensitive
/// ("Zombie" sorts before "apocalypse").
pub async fn list_genres(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let genres = sqlx::query_as::<_, Genre>(
        "SELECT genre_id, name FROM Genres ORDER BY name ASC, genre_id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(genres)
}

/// Find genre by ID
pub async fn find_genre_by_id(pool: &SqlitePool, genre_id: GenreId) -> Result<Option<Genre>> {
    let genre = sqlx::query_as::<_, Genre>("SELECT genre_id, name FROM Genres WHERE genre_id = ?")
        .bind(genre_id)
        .fetch_optional(pool)
        .await?;

    Ok(genre)
}

/// Find the first genre whose name matches exactly
pub async fn find_genre_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let genre = sqlx::query_as::<_, Genre>(
        "SELECT genre_id, name FROM Genres WHERE name = ? ORDER BY genre_id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(genre)
}

/// Insert a new genre
///
/// Returns the stored record with its assigned ID.
pub async fn insert_genre(pool: &SqlitePool, genre: &NewGenre) -> Result<Genre> {
    let result = sqlx::query("INSERT INTO Genres (name) VALUES (?)")
        .bind(&genre.name)
        .execute(pool)
        .await?;

    Ok(Genre {
        id: result.last_insert_rowid(),
        name: genre.name.clone(),
    })
}

/// Rename the genre at `genre_id`
///
/// Returns `None` when no genre has that ID. The ID itself never changes.
pub async fn update_genre_name(
    pool: &SqlitePool,
    genre_id: GenreId,
    name: &str,
) -> Result<Option<Genre>> {
    let result = sqlx::query(
        "UPDATE Genres SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE genre_id = ?",
    )
    .bind(name)
    .bind(genre_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Genre {
        id: genre_id,
        name: name.to_string(),
    }))
}

/// Delete a genre
///
/// Returns whether a row was removed.
pub async fn delete_genre(pool: &SqlitePool, genre_id: GenreId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM Genres WHERE genre_id = ?")
        .bind(genre_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book
///
/// Returns the book_id of the inserted book.
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<BookId> {
    let result = sqlx::query(
        r#"
        INSERT INTO Books (title, summary, isbn, author_id, genre_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(&book.summary)
    .bind(&book.isbn)
    .bind(book.author_id)
    .bind(book.genre_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List all books that reference a genre, ordered by title
pub async fn find_books_by_genre(pool: &SqlitePool, genre_id: GenreId) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT book_id, title, summary, isbn, author_id, genre_id
        FROM Books
        WHERE genre_id = ?
        ORDER BY title
        "#,
    )
    .bind(genre_id)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

// ============================================================================
// AUTHOR QUERIES
// ============================================================================

/// Insert a new author
///
/// Returns the author_id of the inserted author.
pub async fn insert_author(pool: &SqlitePool, author: &NewAuthor) -> Result<AuthorId> {
    let result = sqlx::query(
        r#"
        INSERT INTO Authors (first_name, family_name, date_of_birth, date_of_death)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&author.first_name)
    .bind(&author.family_name)
    .bind(author.date_of_birth)
    .bind(author.date_of_death)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find author by ID
pub async fn find_author_by_id(pool: &SqlitePool, author_id: AuthorId) -> Result<Option<Author>> {
    let author = sqlx::query_as::<_, Author>(
        r#"
        SELECT author_id, first_name, family_name, date_of_birth, date_of_death
        FROM Authors
        WHERE author_id = ?
        "#,
    )
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(author)
}
