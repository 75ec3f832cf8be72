//! Product model and DTOs.

use serde::Serialize;
use showroom_core::types::DbId;
use sqlx::FromRow;

/// A row from the `products` table.
///
/// Serializes with the column names unchanged (`p_condition` included), which
/// is the JSON shape the storefront reads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub p_condition: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
}

/// DTO for inserting a new listing.
///
/// `image_url` is the public path of an image already written to the image
/// directory; the remaining fields are stored as submitted.
#[derive(Debug, Clone, Default)]
pub struct CreateProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
}
