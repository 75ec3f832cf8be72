//! Repository for the `products` table.
//!
//! Listing, insertion and hard deletion. Listings are never updated in place.

use showroom_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product};

/// Column list for `products` queries.
const COLUMNS: &str = "id, name, category, p_condition, price, description, image_url";

/// Provides data access for catalog listings.
pub struct ProductRepo;

impl ProductRepo {
    /// All listings, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Insert a listing and return the id assigned by the store.
    pub async fn create(pool: &PgPool, dto: &CreateProduct) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO products \
                 (name, category, p_condition, price, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.category)
        .bind(&dto.condition)
        .bind(&dto.price)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .fetch_one(pool)
        .await
    }

    /// Hard-delete a listing. Returns `true` if a row was removed; deleting an
    /// unknown id is not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
