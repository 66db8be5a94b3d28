//! Conversion of controller results into HTTP responses.
//!
//! Rendered views are sent as JSON with 200, redirects as 303 See Other, and
//! errors as their status code with a user-facing message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::error;

use crate::catalog::view::Outcome;
use crate::error::CatalogError;

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(view) => (StatusCode::OK, Json(view)).into_response(),
            Outcome::Redirect { location } => Redirect::to(&location).into_response(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self, store = self.is_store_error(), "request failed");
        }

        (status, self.user_message()).into_response()
    }
}
