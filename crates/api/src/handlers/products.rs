//! Handlers for the `/products` resource.

use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use showroom_core::error::CoreError;
use showroom_core::types::DbId;
use showroom_db::models::product::{CreateProduct, Product};
use showroom_db::repositories::ProductRepo;
use showroom_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// Upper bound on the direct connection attempt made to explain a pool
/// timeout.
const CONNECT_DIAGNOSIS_LIMIT: Duration = Duration::from_secs(2);

/// An image file received in the `image` multipart field.
struct UploadedImage {
    file_name: String,
    data: Vec<u8>,
}

/// GET /api/products
///
/// Every listing, most recent first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let pool = state.pool()?;
    match ProductRepo::list(pool).await {
        Ok(products) => Ok(Json(products)),
        Err(e) => Err(store_failure(pool, "Database error", e).await),
    }
}

/// POST /api/products
///
/// Accepts a multipart form with a required `image` file and optional text
/// fields `name`, `category`, `condition`, `price` and `desc`. The whole body
/// is read before anything is written, so a missing image is rejected with no
/// file stored and no row inserted.
///
/// The image is written before the row is inserted. If the insert fails the
/// file stays on disk.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<CreatedResponse>> {
    let mut image: Option<UploadedImage> = None;
    let mut dto = CreateProduct::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(AppError::Multipart)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                // Only a file part counts. A plain text field named `image`
                // has no filename, and browsers send an unnamed empty part
                // when no file was picked.
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let data = field.bytes().await.map_err(AppError::Multipart)?;
                if let Some(file_name) = file_name {
                    image = Some(UploadedImage {
                        file_name,
                        data: data.to_vec(),
                    });
                }
            }
            "name" | "category" | "condition" | "price" | "desc" => {
                let text = field.text().await.map_err(AppError::Multipart)?;
                match name.as_str() {
                    "name" => dto.name = Some(text),
                    "category" => dto.category = Some(text),
                    "condition" => dto.condition = Some(text),
                    "price" => dto.price = Some(text),
                    _ => dto.description = Some(text),
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let image = image.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Image file is required".into()))
    })?;
    let pool = state.pool()?;

    let stored = state
        .images
        .save(&image.file_name, &image.data)
        .await
        .map_err(|e| AppError::Core(CoreError::Internal(format!("Failed to store image: {e}"))))?;
    dto.image_url = stored.url;

    let id = match ProductRepo::create(pool, &dto).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(filename = %stored.filename, "Listing insert failed, image left on disk");
            return Err(store_failure(pool, "Failed to save to database", e).await);
        }
    };

    tracing::info!(id, filename = %stored.filename, "Created listing");
    Ok(Json(CreatedResponse {
        message: "Success",
        id,
    }))
}

/// DELETE /api/products/{id}
///
/// Hard-deletes the listing. Unknown ids succeed too. The image file is kept.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let pool = state.pool()?;
    let removed = match ProductRepo::delete(pool, id).await {
        Ok(removed) => removed,
        Err(e) => return Err(store_failure(pool, "Failed to delete item", e).await),
    };

    tracing::info!(id, removed, "Deleted listing");
    Ok(Json(MessageResponse { message: "Deleted" }))
}

/// Tag a store error with its caller-facing message, replacing a bare pool
/// timeout with the connection error behind it.
async fn store_failure(pool: &DbPool, context: &'static str, e: sqlx::Error) -> AppError {
    let source = showroom_db::explain_pool_error(pool, e, CONNECT_DIAGNOSIS_LIMIT).await;
    AppError::storage(context)(source)
}
