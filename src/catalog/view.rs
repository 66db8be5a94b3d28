//! Render and redirect directives produced by controllers.
//!
//! Controllers never write responses themselves. They return an `Outcome`
//! naming a template plus the data to fill it with, or a location to send
//! the client to. Turning that into bytes is the caller's job.

use serde::Serialize;

use crate::catalog::sanitize::FieldError;
use crate::storage::models::{book_url, genre_url, Book, BookId, Genre, GenreId};

pub const GENRE_LIST_TEMPLATE: &str = "genre_list";
pub const GENRE_DETAIL_TEMPLATE: &str = "genre_detail";
pub const GENRE_FORM_TEMPLATE: &str = "genre_form";
pub const GENRE_DELETE_TEMPLATE: &str = "genre_delete";

/// What a controller operation decided to do with the request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Redirect { location: String },
}

impl Outcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect {
            location: location.into(),
        }
    }

    /// The rendered view, if this outcome renders one
    pub fn view(&self) -> Option<&View> {
        match self {
            Outcome::Render(view) => Some(view),
            Outcome::Redirect { .. } => None,
        }
    }

    /// The redirect target, if this outcome redirects
    pub fn location(&self) -> Option<&str> {
        match self {
            Outcome::Redirect { location } => Some(location),
            Outcome::Render(_) => None,
        }
    }
}

/// Template name, page title and the data to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub data: ViewData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    GenreList {
        genre_list: Vec<GenreEntry>,
    },
    GenreDetail {
        genre: GenreEntry,
        genre_books: Vec<BookEntry>,
    },
    GenreForm {
        genre: Option<GenreFormValue>,
        errors: Vec<FieldError>,
    },
    GenreDelete {
        genre: GenreEntry,
        genre_books: Vec<BookEntry>,
    },
}

/// Genre as shown in views, with its canonical location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreEntry {
    pub id: GenreId,
    pub name: String,
    pub url: String,
}

impl From<Genre> for GenreEntry {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre_url(genre.id),
            id: genre.id,
            name: genre.name,
        }
    }
}

/// Book as listed under a genre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookEntry {
    pub id: BookId,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<Book> for BookEntry {
    fn from(book: Book) -> Self {
        Self {
            url: book_url(book.id),
            id: book.id,
            title: book.title,
            summary: book.summary,
        }
    }
}

/// Values pre-filled into the genre form
///
/// `id` is absent for a create form that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreFormValue {
    pub id: Option<GenreId>,
    pub name: String,
}

impl From<Genre> for GenreFormValue {
    fn from(genre: Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name,
        }
    }
}

pub(crate) fn books(books: Vec<Book>) -> Vec<BookEntry> {
    books.into_iter().map(BookEntry::from).collect()
}
