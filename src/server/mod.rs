//! HTTP server for the catalog.
//!
//! # Routes
//! - `GET  /catalog/genres` - genre list
//! - `GET  /catalog/genre/create`, `POST` - create form / create
//! - `GET  /catalog/genre/:id` - genre detail
//! - `GET  /catalog/genre/:id/delete`, `POST` - delete confirmation / delete
//! - `GET  /catalog/genre/:id/update`, `POST` - edit form / rename
//!
//! Views are returned as JSON; redirects are `303 See Other`.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub mod response;
pub mod routes;

use crate::catalog::genre::GenreController;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{CatalogStore, Database};
use routes::{
    genre_create_get, genre_create_post, genre_delete_get, genre_delete_post, genre_detail,
    genre_list, genre_update_get, genre_update_post,
};

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "catalog_core=info,tower_http=info";

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// Build the catalog router over any store
pub fn router<S: CatalogStore + 'static>(genres: GenreController<S>) -> Router {
    Router::new()
        .route("/catalog/genres", get(genre_list::<S>))
        .route(
            "/catalog/genre/create",
            get(genre_create_get::<S>).post(genre_create_post::<S>),
        )
        .route("/catalog/genre/:id", get(genre_detail::<S>))
        .route(
            "/catalog/genre/:id/delete",
            get(genre_delete_get::<S>).post(genre_delete_post::<S>),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genre_update_get::<S>).post(genre_update_post::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(genres)
}

/// Open the database and serve until Ctrl+C or SIGTERM
pub async fn start_server(config: Config) -> Result<()> {
    info!("Opening database...");
    let db = Database::new(&config.database_path).await?;
    let app = router(GenreController::new(Arc::new(db.clone())));

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    db.close().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
