//! HTTP client for the showroom catalog endpoints.
//!
//! [`CatalogApi`] is the seam the sync engine talks to; [`HttpCatalogApi`]
//! implements it with [`reqwest`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use showroom_core::catalog::Product;
use showroom_core::types::DbId;

use crate::error::ClientError;

/// Path of the catalog collection, relative to the API base.
const PRODUCTS_PATH: &str = "api/products";

/// An image picked in the listing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A listing ready to be submitted. Carrying the image by value (not as an
/// `Option`) makes an image-less submission unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub image: ImageFile,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub price: String,
    pub description: String,
}

/// Catalog operations the storefront needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Every listing, in server order (most recent first).
    async fn list(&self) -> Result<Vec<Product>, ClientError>;

    /// Submit a new listing; returns the id the store assigned.
    async fn create(&self, listing: &NewListing) -> Result<DbId, ClientError>;

    /// Delete a listing by id.
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: DbId,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: reqwest::Client,
    products_url: Url,
}

impl HttpCatalogApi {
    /// Create a client for the API served at `api_base`, e.g.
    /// `http://localhost:3000`.
    pub fn new(api_base: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_base: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: api_base.to_string(),
            reason,
        };
        let mut base = Url::parse(api_base).map_err(|e| invalid(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let products_url = base
            .join(PRODUCTS_PATH)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            client,
            products_url,
        })
    }

    pub fn products_url(&self) -> &Url {
        &self.products_url
    }

    fn item_url(&self, id: DbId) -> Url {
        let mut url = self.products_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`ClientError::Server`] carrying the body's `error` field if present.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.error);
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.products_url.clone()).send().await?;
        Self::parse_json(response).await
    }

    async fn create(&self, listing: &NewListing) -> Result<DbId, ClientError> {
        let image = Part::bytes(listing.image.bytes.clone()).file_name(listing.image.file_name.clone());
        let form = Form::new()
            .part("image", image)
            .text("name", listing.name.clone())
            .text("category", listing.category.clone())
            .text("condition", listing.condition.clone())
            .text("price", listing.price.clone())
            .text("desc", listing.description.clone());

        let response = self
            .client
            .post(self.products_url.clone())
            .multipart(form)
            .send()
            .await?;
        let created: CreatedBody = Self::parse_json(response).await?;
        Ok(created.id)
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
