//! Error types for the catalog backend
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (lookup, storage, configuration) so the
//! HTTP boundary can pick a status code without inspecting messages.
//!
//! ## What is NOT an error
//!
//! Two outcomes that look like failures are rendered instead of raised:
//! - Form validation failures re-render the form with per-field messages
//!   (see `catalog::sanitize::ValidationErrors`).
//! - A genre deletion blocked by referencing books re-renders the delete
//!   confirmation listing those books.
//!
//! Everything below is either a missing record (404) or a failure of the
//! request that is propagated to the generic handler (500).

use crate::storage::models::GenreId;
use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for the catalog backend
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== Lookup Errors =====

    /// Genre with the requested id does not exist
    #[error("Genre not found: {0}")]
    GenreNotFound(GenreId),

    /// Any other record that does not exist
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    // ===== Database Errors =====

    /// Generic database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    // ===== File/Configuration Errors =====

    /// Generic file I/O error
    #[error("File I/O error: {0}")]
    FileIoError(String),

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ===== General Errors =====

    /// Internal error that should not normally occur
    #[error("Internal error: {0}")]
    InternalError(String),

    // ===== External Library Errors =====

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl CatalogError {
    /// Create a RecordNotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        CatalogError::RecordNotFound(resource.into())
    }

    /// Create an InvalidConfiguration error with a message
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        CatalogError::InvalidConfiguration(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        CatalogError::InternalError(message.into())
    }

    /// Check if error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::GenreNotFound(_) | CatalogError::RecordNotFound(_)
        )
    }

    /// Check if error came from the underlying store
    ///
    /// Store errors are never retried; they fail the current request only.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            CatalogError::DatabaseError(_)
                | CatalogError::MigrationFailed(_)
                | CatalogError::SqlxError(_)
        )
    }

    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::GenreNotFound(_) | CatalogError::RecordNotFound(_) => 404,
            _ => 500,
        }
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Store and internal failures are reported generically so that query
    /// text and file paths are not leaked to clients.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::GenreNotFound(_) => "Genre not found".to_string(),
            CatalogError::RecordNotFound(resource) => format!("{} not found", resource),
            _ if self.is_store_error() => {
                "The catalog is temporarily unavailable. Please try again later.".to_string()
            }
            _ => "Something went wrong while handling the request.".to_string(),
        }
    }
}
