pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register        register (public)
/// /auth/login           login (public)
/// /auth/refresh         refresh (public)
/// /auth/logout          logout (requires auth)
///
/// /videos               ingest a new video (requires auth)
/// /videos/{id}/like     like / unlike (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/videos", post(handlers::video::upload_video))
        .route(
            "/videos/{id}/like",
            post(handlers::like::like_video).delete(handlers::like::unlike_video),
        )
}
