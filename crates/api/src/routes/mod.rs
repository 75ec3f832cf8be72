pub mod health;

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products          list (GET), create (POST, multipart)
/// /products/{id}     delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::products::list).post(handlers::products::create),
        )
        .route("/products/{id}", delete(handlers::products::delete))
}
