//! Catalog controllers
//!
//! Request-level flows that sit between routing and storage. Input is
//! sanitized first (`sanitize`), independent reads are issued together
//! (`fanout`), and every operation ends in a render or redirect directive
//! (`view`).

pub mod fanout;
pub mod genre;
pub mod sanitize;
pub mod view;

pub use genre::{GenreController, GenreForm};
pub use sanitize::{sanitize_genre_name, FieldError, GenreName, ValidationErrors};
pub use view::{Outcome, View, ViewData};
