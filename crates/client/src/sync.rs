//! Client sync engine.
//!
//! [`SyncEngine`] owns the [`Storefront`] state and runs every user action
//! against it: catalog refresh, tab and search changes, the listing create
//! and delete flows, and the admin gate. After each action it re-renders,
//! so [`SyncEngine::view`] always matches [`SyncEngine::state`].
//!
//! Actions take `&mut self`, so one engine never runs two flows at once.
//! Two engines sharing a backend can still interleave refreshes; whichever
//! list response lands last wins.

use showroom_core::types::DbId;
use tracing::{debug, error, info, warn};

use crate::api::CatalogApi;
use crate::error::ClientError;
use crate::gate::{ConvenienceGate, GateOutcome, ACCESS_DENIED_MESSAGE, PASSPHRASE_PROMPT};
use crate::image_root::ImageRoot;
use crate::render::{render, RenderedView, StorefrontSettings};
use crate::state::{ListingForm, Section, Storefront};

pub const LISTED_MESSAGE: &str = "Item successfully listed!";
pub const IMAGE_REQUIRED_MESSAGE: &str = "Please select an image.";
pub const UPLOAD_NETWORK_MESSAGE: &str = "Network error during upload.";
pub const DELETE_CONFIRMATION: &str = "Delete this item?";
pub const DELETE_FAILED_MESSAGE: &str = "Could not delete item.";

/// Blocking user-facing dialogs.
pub trait Interaction: Send + Sync {
    /// Show a message and wait for it to be dismissed.
    fn notify(&self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&self, question: &str) -> bool;

    /// Ask for a line of text. `None` when the dialog was dismissed.
    fn prompt(&self, question: &str) -> Option<String>;
}

pub struct SyncEngine<A, U> {
    api: A,
    ui: U,
    gate: ConvenienceGate,
    settings: StorefrontSettings,
    images: ImageRoot,
    state: Storefront,
    form: ListingForm,
    view: RenderedView,
}

impl<A: CatalogApi, U: Interaction> SyncEngine<A, U> {
    pub fn new(
        api: A,
        ui: U,
        gate: ConvenienceGate,
        settings: StorefrontSettings,
        images: ImageRoot,
    ) -> Self {
        let state = Storefront::new();
        let view = render(&state, &settings, &images);
        Self {
            api,
            ui,
            gate,
            settings,
            images,
            state,
            form: ListingForm::default(),
            view,
        }
    }

    pub fn state(&self) -> &Storefront {
        &self.state
    }

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn form(&self) -> &ListingForm {
        &self.form
    }

    /// The listing form, for the page to write typed values into.
    pub fn form_mut(&mut self) -> &mut ListingForm {
        &mut self.form
    }

    fn rerender(&mut self) {
        self.view = render(&self.state, &self.settings, &self.images);
    }

    /// Fetch the whole catalog and re-render.
    ///
    /// Any failure empties the catalog before rendering so nothing stale stays
    /// on screen. The error is logged and returned.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let result = self.api.list().await;
        let outcome = match result {
            Ok(catalog) => {
                debug!(count = catalog.len(), "Catalog refreshed");
                self.state.replace_catalog(catalog);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch catalog");
                self.state.clear_catalog();
                Err(e)
            }
        };
        self.rerender();
        outcome
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.state.set_search_term(term);
        self.rerender();
    }

    /// Activate a category tab (`"all"` for every category).
    pub fn select_category(&mut self, category: &str) {
        self.state.set_category(category);
        self.rerender();
    }

    /// Switch sections. The admin section stays out of reach until the gate
    /// has been passed.
    pub fn show_section(&mut self, section: Section) {
        if section == Section::Admin && !self.state.admin_nav_visible() {
            warn!("Admin section requested before unlock; ignoring");
            return;
        }
        self.state.show_section(section);
    }

    /// Submit the listing form.
    ///
    /// Without an image nothing is sent. On success the form is cleared, the
    /// catalog refreshed and the shop section shown. On failure the form is
    /// kept. The submit control is restored either way.
    pub async fn submit_listing(&mut self) -> Result<DbId, ClientError> {
        let Some(listing) = self.form.to_listing() else {
            self.ui.notify(IMAGE_REQUIRED_MESSAGE);
            return Err(ClientError::Validation("image required".into()));
        };

        self.state.begin_submit();
        let result = self.api.create(&listing).await;

        let outcome = match result {
            Ok(id) => {
                info!(id, name = %listing.name, "Listing created");
                self.ui.notify(LISTED_MESSAGE);
                self.form.clear();
                // A failed refresh has already been logged and rendered empty.
                let _ = self.refresh().await;
                self.state.show_section(Section::Shop);
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Listing upload failed");
                self.ui.notify(&upload_failure_message(&e));
                Err(e)
            }
        };

        self.state.finish_submit();
        outcome
    }

    /// Delete a listing after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declined and no request was sent.
    pub async fn delete_listing(&mut self, id: DbId) -> Result<bool, ClientError> {
        if !self.ui.confirm(DELETE_CONFIRMATION) {
            debug!(id, "Delete declined");
            return Ok(false);
        }

        match self.api.delete(id).await {
            Ok(()) => {
                info!(id, "Listing deleted");
                let _ = self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                warn!(id, error = %e, "Listing delete failed");
                self.ui.notify(DELETE_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    /// Prompt for the admin passphrase and unlock the admin section on a
    /// match.
    pub fn attempt_admin_login(&mut self) -> GateOutcome {
        let answer = self.ui.prompt(PASSPHRASE_PROMPT);
        let outcome = self.gate.check(answer.as_deref());
        match outcome {
            GateOutcome::Granted => {
                info!("Admin mode unlocked");
                self.state.unlock_admin();
            }
            GateOutcome::Denied => {
                info!("Admin passphrase mismatch");
                self.ui.notify(ACCESS_DENIED_MESSAGE);
            }
            GateOutcome::Cancelled => {}
        }
        outcome
    }

    /// Drop all state, including the catalog and any half-filled form, and
    /// reload the catalog as on first load.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        info!("Admin logout");
        self.state.reset();
        self.form.clear();
        self.refresh().await
    }
}

fn upload_failure_message(e: &ClientError) -> String {
    match e {
        ClientError::Network(_) => UPLOAD_NETWORK_MESSAGE.to_string(),
        ClientError::Server {
            message: Some(message),
            ..
        } => format!("Upload failed: {message}"),
        _ => "Upload failed: Unknown error".to_string(),
    }
}
