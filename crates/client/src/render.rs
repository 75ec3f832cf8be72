//! Render Engine: storefront state in, HTML fragments out.
//!
//! [`render`] is pure. Given the same [`Storefront`] snapshot, settings and
//! image root it always produces the same [`RenderedView`]. Every value that
//! came from the catalog is HTML-escaped before it is interpolated.

use showroom_core::catalog::{Product, ALL_CATEGORIES};
use showroom_core::types::DbId;

use crate::image_root::ImageRoot;
use crate::state::Storefront;

/// Public grid content when no listing passes the filters.
pub const EMPTY_PLACEHOLDER: &str = "<p class=\"empty\">No products found.</p>";

/// Shop-specific display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    /// Name used in the pre-filled inquiry message ("Hi <owner>, ...").
    pub owner_name: String,
    /// WhatsApp number in international format without `+`.
    pub contact_number: String,
    /// Prefix shown before every price.
    pub currency: String,
    /// Image shown when a listing's image fails to load.
    pub placeholder_image: String,
    /// Category tabs, in display order. The `all` tab is always shown first
    /// and need not be listed.
    pub categories: Vec<String>,
}

impl StorefrontSettings {
    /// Tab values in display order, starting with `all`.
    pub fn tabs(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORIES)
            .chain(
                self.categories
                    .iter()
                    .map(String::as_str)
                    .filter(|c| *c != ALL_CATEGORIES),
            )
            .collect()
    }

    /// Inquiry deep link for one product.
    pub fn inquiry_link(&self, product_name: &str) -> String {
        let message = format!("Hi {}, I'm interested in {product_name}", self.owner_name);
        format!(
            "https://wa.me/{}?text={}",
            self.contact_number,
            encode_uri_component(&message)
        )
    }
}

/// The two fragments the page displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    /// Public product cards (or the empty placeholder).
    pub public_grid: String,
    /// Admin rows with delete controls. Empty when nothing is visible.
    pub admin_list: String,
    /// Category tab bar; exactly one tab carries the `active` class.
    pub tabs: String,
    /// Ids of the rendered listings, in display order.
    pub shown_ids: Vec<DbId>,
}

/// Render the storefront.
pub fn render(
    state: &Storefront,
    settings: &StorefrontSettings,
    images: &ImageRoot,
) -> RenderedView {
    let visible = state.visible();

    let mut view = RenderedView {
        tabs: render_tabs(settings, state.active_category()),
        ..RenderedView::default()
    };

    if visible.is_empty() {
        view.public_grid.push_str(EMPTY_PLACEHOLDER);
        return view;
    }

    for product in visible {
        let image_url = images.resolve(&product.image_url);
        view.public_grid.push_str(&render_card(product, &image_url, settings));
        view.admin_list.push_str(&render_admin_row(product, &image_url));
        view.shown_ids.push(product.id);
    }
    view
}

fn render_card(product: &Product, image_url: &str, settings: &StorefrontSettings) -> String {
    let name = escape_html(product.name());
    format!(
        "<div class=\"card\" data-id=\"{id}\">\
         <div class=\"badge\">{condition}</div>\
         <img src=\"{src}\" alt=\"{name}\" loading=\"lazy\" \
         onerror=\"this.onerror=null;this.src='{placeholder}'\">\
         <div class=\"card-body\">\
         <small class=\"card-category\">{category}</small>\
         <h3>{name}</h3>\
         <div class=\"card-price\">{currency} {price}</div>\
         <a href=\"{link}\" target=\"_blank\" rel=\"noopener\" class=\"wa-link\">Buy on WhatsApp</a>\
         </div>\
         </div>",
        id = product.id,
        condition = escape_html(product.condition_label()),
        src = escape_html(image_url),
        placeholder = escape_html(&settings.placeholder_image),
        category = escape_html(product.category()),
        currency = escape_html(&settings.currency),
        price = escape_html(&product.price_label()),
        link = escape_html(&settings.inquiry_link(product.name())),
    )
}

fn render_admin_row(product: &Product, image_url: &str) -> String {
    format!(
        "<div class=\"admin-item\" data-id=\"{id}\">\
         <img src=\"{src}\" width=\"50\" height=\"50\" alt=\"\">\
         <div class=\"admin-name\"><b>{name}</b></div>\
         <button class=\"delete-btn\" data-action=\"delete\" data-id=\"{id}\">Delete</button>\
         </div>",
        id = product.id,
        src = escape_html(image_url),
        name = escape_html(product.name()),
    )
}

fn render_tabs(settings: &StorefrontSettings, active: &str) -> String {
    settings
        .tabs()
        .into_iter()
        .map(|tab| {
            let class = if tab == active { "tab active" } else { "tab" };
            let label = if tab == ALL_CATEGORIES { "All" } else { tab };
            format!(
                "<button class=\"{class}\" data-cat=\"{cat}\">{label}</button>",
                cat = escape_html(tab),
                label = escape_html(label),
            )
        })
        .collect()
}

/// Escape text for use in HTML content and double- or single-quoted
/// attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode like JavaScript's `encodeURIComponent`: everything except
/// ASCII alphanumerics and `-_.!~*'()` is escaped as UTF-8 bytes.
pub fn encode_uri_component(raw: &str) -> String {
    const KEEP: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(raw.len() * 3);
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
