//! Wire representation of a catalog product.
//!
//! The API serializes database rows into this shape and the storefront client
//! deserializes it back. Every column except `id` and `image_url` may be null
//! at the storage layer, so the client-facing accessors supply display
//! defaults instead of failing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::DbId;

/// Condition shown when a product has none recorded.
pub const DEFAULT_CONDITION: &str = "New";

/// Category filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// A single listing as returned by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "p_condition")]
    pub condition: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
}

impl Product {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Condition badge text, falling back to [`DEFAULT_CONDITION`].
    pub fn condition_label(&self) -> &str {
        match self.condition.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CONDITION,
        }
    }

    /// Formatted price for display; empty when no price was recorded.
    pub fn price_label(&self) -> String {
        self.price.as_ref().map(Price::display).unwrap_or_default()
    }

    /// Whether this product passes the category tab and search box.
    ///
    /// `category` equal to [`ALL_CATEGORIES`] disables the category check.
    /// The search term matches anywhere in the name, ignoring case.
    pub fn matches(&self, category: &str, search_term: &str) -> bool {
        let category_ok = category == ALL_CATEGORIES || self.category() == category;
        category_ok
            && self
                .name()
                .to_lowercase()
                .contains(&search_term.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A price exactly as it was entered.
///
/// Stored as text so that values like `"15000"`, `"2,500"` or `"Negotiable"`
/// all survive the round trip. Deserializes from either a JSON string or a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Price(String);

impl Price {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric prices are grouped by thousands with up to three fraction
    /// digits; anything that is not a finite number is returned verbatim.
    ///
    /// ```
    /// use showroom_core::catalog::Price;
    ///
    /// assert_eq!(Price::new("15000").display(), "15,000");
    /// assert_eq!(Price::new("1234.5").display(), "1,234.5");
    /// assert_eq!(Price::new("Negotiable").display(), "Negotiable");
    /// ```
    pub fn display(&self) -> String {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return self.0.clone();
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => group_thousands(value),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Price {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Price {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawPrice::deserialize(deserializer)? {
            RawPrice::Text(s) => Price(s),
            RawPrice::Number(n) => Price(n.to_string()),
        })
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: DbId, name: &str, category: &str) -> Product {
        Product {
            id,
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            condition: None,
            price: None,
            description: None,
            image_url: format!("/uploads/prod_{id}.jpg"),
        }
    }

    #[test]
    fn price_groups_integers() {
        assert_eq!(Price::new("0").display(), "0");
        assert_eq!(Price::new("999").display(), "999");
        assert_eq!(Price::new("1000").display(), "1,000");
        assert_eq!(Price::new("2000").display(), "2,000");
        assert_eq!(Price::new("1234567").display(), "1,234,567");
    }

    #[test]
    fn price_keeps_up_to_three_fraction_digits() {
        assert_eq!(Price::new("1500.50").display(), "1,500.5");
        assert_eq!(Price::new("0.1234").display(), "0.123");
        assert_eq!(Price::new("10.0").display(), "10");
    }

    #[test]
    fn price_negative_and_padded() {
        assert_eq!(Price::new("-2500").display(), "-2,500");
        assert_eq!(Price::new("  4200 ").display(), "4,200");
    }

    #[test]
    fn price_non_numeric_is_verbatim() {
        assert_eq!(Price::new("Negotiable").display(), "Negotiable");
        assert_eq!(Price::new("1,500").display(), "1,500");
        assert_eq!(Price::new("").display(), "");
        assert_eq!(Price::new("inf").display(), "inf");
        assert_eq!(Price::new("NaN").display(), "NaN");
    }

    #[test]
    fn price_deserializes_from_string_or_number() {
        let text: Price = serde_json::from_str("\"15000\"").unwrap();
        let number: Price = serde_json::from_str("15000").unwrap();
        let float: Price = serde_json::from_str("99.5").unwrap();
        assert_eq!(text, Price::new("15000"));
        assert_eq!(number, Price::new("15000"));
        assert_eq!(float.display(), "99.5");
    }

    #[test]
    fn product_reads_database_column_names() {
        let json = r#"{
            "id": 7,
            "name": "Sofa",
            "category": "Furniture",
            "p_condition": "Used",
            "price": 15000,
            "description": null,
            "image_url": "/uploads/prod_1.jpg"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.condition_label(), "Used");
        assert_eq!(p.price_label(), "15,000");
        assert_eq!(p.description, None);

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["p_condition"], "Used");
        assert_eq!(back["price"], "15000");
    }

    #[test]
    fn missing_condition_displays_new() {
        let mut p = product(1, "Lamp", "Decor");
        assert_eq!(p.condition_label(), "New");
        p.condition = Some("  ".into());
        assert_eq!(p.condition_label(), "New");
    }

    #[test]
    fn matches_all_sentinel_and_exact_category() {
        let p = product(1, "Lamp", "Decor");
        assert!(p.matches(ALL_CATEGORIES, ""));
        assert!(p.matches("Decor", ""));
        assert!(!p.matches("decor", ""));
        assert!(!p.matches("Furniture", ""));
    }

    #[test]
    fn matches_search_case_insensitively() {
        let p = product(2, "Sofa Bed", "Furniture");
        assert!(p.matches(ALL_CATEGORIES, "so"));
        assert!(p.matches(ALL_CATEGORIES, "BED"));
        assert!(!p.matches(ALL_CATEGORIES, "lamp"));
        assert!(!p.matches("Decor", "so"));
    }

    #[test]
    fn null_name_only_matches_empty_search() {
        let mut p = product(3, "", "Decor");
        p.name = None;
        assert!(p.matches(ALL_CATEGORIES, ""));
        assert!(!p.matches(ALL_CATEGORIES, "a"));
    }
}
