//! Storefront application state.
//!
//! Everything the page shows is derived from a [`Storefront`]. It changes only
//! through the action methods below; nothing else mutates it.

use showroom_core::catalog::{Product, ALL_CATEGORIES};

use crate::api::{ImageFile, NewListing};

/// Submit button label while idle.
pub const SUBMIT_IDLE_LABEL: &str = "Post to Showroom";

/// Submit button label while a listing upload is in flight.
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

/// The two mutually exclusive page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Shop,
    Admin,
}

/// State of the listing form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_IDLE_LABEL,
        }
    }
}

impl SubmitControl {
    pub fn begin(&mut self) {
        self.enabled = false;
        self.label = SUBMIT_BUSY_LABEL;
    }

    pub fn finish(&mut self) {
        *self = Self::default();
    }
}

/// Values typed into the admin "add listing" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub image: Option<ImageFile>,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub price: String,
    pub description: String,
}

impl ListingForm {
    /// The submission payload, or `None` when no image has been picked.
    pub fn to_listing(&self) -> Option<NewListing> {
        let image = self.image.clone()?;
        Some(NewListing {
            image,
            name: self.name.clone(),
            category: self.category.clone(),
            condition: self.condition.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// In-memory storefront state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storefront {
    catalog: Vec<Product>,
    active_category: String,
    search_term: String,
    section: Section,
    admin_nav_visible: bool,
    submit: SubmitControl,
}

impl Default for Storefront {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            active_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
            section: Section::Shop,
            admin_nav_visible: false,
            submit: SubmitControl::default(),
        }
    }
}

impl Storefront {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn admin_nav_visible(&self) -> bool {
        self.admin_nav_visible
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// Catalog rows that pass the active tab and the search box, in catalog
    /// order.
    pub fn visible(&self) -> Vec<&Product> {
        self.catalog
            .iter()
            .filter(|p| p.matches(&self.active_category, &self.search_term))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Replace the catalog with a freshly fetched snapshot.
    pub fn replace_catalog(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
    }

    /// Forget every listing (after a failed refresh).
    pub fn clear_catalog(&mut self) {
        self.catalog.clear();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.active_category = category.into();
    }

    pub fn show_section(&mut self, section: Section) {
        self.section = section;
    }

    /// Reveal the admin navigation and switch to the admin section.
    pub fn unlock_admin(&mut self) {
        self.admin_nav_visible = true;
        self.section = Section::Admin;
    }

    pub fn begin_submit(&mut self) {
        self.submit.begin();
    }

    pub fn finish_submit(&mut self) {
        self.submit.finish();
    }

    /// Discard everything and return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
