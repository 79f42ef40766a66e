//! Router configuration.
//!
//! # Route structure
//!
//! - `GET  /`              - shorten form (presentation only)
//! - `POST /shorten`       - create a short mapping
//! - `GET  /track/{code}`  - aggregated click data
//! - `GET  /{code}`        - short link redirect
//!
//! The literal routes are registered before the `/{code}` capture, so
//! `shorten` and `track` can never be shadowed by a short code.

use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{index_handler, redirect_handler, shorten_handler, track_handler};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/shorten", post(shorten_handler))
        .route("/track/{code}", get(track_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
