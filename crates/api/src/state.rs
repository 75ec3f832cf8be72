use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog store pool. `None` when the connection configuration could not
    /// be parsed at startup; catalog endpoints then answer `NotConnected`.
    pub pool: Option<showroom_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Uploaded product images.
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// The catalog store pool, or [`AppError::NotConnected`] in degraded mode.
    pub fn pool(&self) -> AppResult<&showroom_db::DbPool> {
        self.pool.as_ref().ok_or(AppError::NotConnected)
    }
}
