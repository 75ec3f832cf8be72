//! Storefront client: catalog sync and rendering.
//!
//! [`sync::SyncEngine`] keeps an in-memory copy of the catalog fetched from
//! the showroom API and re-derives the visible listings whenever the catalog,
//! the category tab or the search box changes. Rendering itself lives in
//! [`render`] and is a pure function of the [`state::Storefront`] snapshot.

pub mod api;
pub mod error;
pub mod gate;
pub mod image_root;
pub mod render;
pub mod state;
pub mod sync;

pub use api::{CatalogApi, HttpCatalogApi};
pub use error::ClientError;
pub use sync::{Interaction, SyncEngine};
