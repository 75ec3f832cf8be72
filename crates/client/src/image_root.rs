//! Image root: the base that turns a stored `image_url` into something a
//! browser can load directly.

use reqwest::Url;

/// Absolute URL prefix for relative image paths.
///
/// Computed once when the storefront starts. Images are served by the API
/// server, so when the API lives on another origin than the page, that
/// origin wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRoot {
    root: String,
}

impl ImageRoot {
    /// Root for a page loaded from `page_url`, talking to the API at
    /// `api_base` (or to its own origin when `None`).
    ///
    /// ```
    /// use reqwest::Url;
    /// use showroom_client::image_root::ImageRoot;
    ///
    /// let page = Url::parse("https://shop.example.com/admin").unwrap();
    /// let same = ImageRoot::for_page(&page, None);
    /// assert_eq!(same.resolve("/uploads/prod_1.jpg"), "https://shop.example.com/uploads/prod_1.jpg");
    ///
    /// let api = Url::parse("https://api.example.com").unwrap();
    /// let split = ImageRoot::for_page(&page, Some(&api));
    /// assert_eq!(split.resolve("/uploads/prod_1.jpg"), "https://api.example.com/uploads/prod_1.jpg");
    /// ```
    pub fn for_page(page_url: &Url, api_base: Option<&Url>) -> Self {
        let source = api_base.unwrap_or(page_url);
        let origin = source.origin();
        let root = if origin.is_tuple() {
            origin.ascii_serialization()
        } else {
            // Opaque origins (file:// pages and the like) have no usable
            // prefix; relative paths are left as they are.
            String::new()
        };
        Self { root }
    }

    /// Root from an explicit prefix such as `http://localhost:3000`.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            root: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.root
    }

    /// Absolute URL for a stored image path. Values that already carry an
    /// `http`/`https` scheme are returned unchanged.
    pub fn resolve(&self, image_url: &str) -> String {
        if is_absolute(image_url) {
            return image_url.to_string();
        }
        if image_url.starts_with('/') {
            format!("{}{image_url}", self.root)
        } else {
            format!("{}/{image_url}", self.root)
        }
    }
}

fn is_absolute(image_url: &str) -> bool {
    let lower = image_url.get(..8).unwrap_or(image_url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
