//! HTTP surface of the visitor log.
//!
//! Provides three endpoints:
//! - `POST /capture` - record a visit (de-duplicated per IP and day)
//! - `GET /fetchRecord` - all stored visits as JSON
//! - `GET /download` - the raw CSV file as `index.csv`
//!
//! Anything else, including a wrong method on a known path, gets a JSON 404.

mod handlers;
mod types;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use handlers::{capture_handler, download_handler, list_records_handler, not_found_handler};
pub use types::{AppState, CapturePayload, CaptureResponse, ALREADY_EXISTS_MESSAGE};

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/capture",
            post(capture_handler).fallback(not_found_handler),
        )
        .route(
            "/fetchRecord",
            get(list_records_handler).fallback(not_found_handler),
        )
        .route(
            "/download",
            get(download_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    if let Ok(addr) = listener.local_addr() {
        log::info!("Server running on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
