//! Catalog backend for genres, authors and books.
//!
//! Routes dispatch to controllers (`catalog`), controllers sanitize form
//! input and talk to the store (`storage`), and every request ends in a
//! rendered view or a redirect.

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use catalog::{GenreController, GenreForm, Outcome};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use storage::{CatalogStore, Database};
