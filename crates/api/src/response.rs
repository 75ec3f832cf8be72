//! Success payloads for the catalog endpoints.
//!
//! The storefront reads these shapes directly, so list results are returned
//! as a bare JSON array and mutations answer with a short `message`.

use serde::Serialize;
use showroom_core::types::DbId;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message": ..., "id": ... }` returned after a listing is created.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: DbId,
}
