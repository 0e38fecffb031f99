//! Data model for products scraped from a listing page.

use serde::{Deserialize, Serialize};

/// Placeholder used for text fields that could not be extracted.
pub const TEXT_SENTINEL: &str = "N/A";

/// Placeholder used for prices that could not be extracted.
pub const PRICE_SENTINEL: f64 = 0.0;

/// One product card from a listing page.
///
/// Every field is always populated: fields that could not be read from the
/// card hold [`TEXT_SENTINEL`] or [`PRICE_SENTINEL`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    name: String,
    price: f64,
    url: String,
}

impl ProductRecord {
    /// Creates a record, substituting sentinels for blank text and invalid prices.
    pub fn new(name: impl Into<String>, price: f64, url: impl Into<String>) -> Self {
        Self {
            name: non_blank(name.into()),
            price: if price.is_finite() && price >= 0.0 { price } else { PRICE_SENTINEL },
            url: non_blank(url.into()),
        }
    }

    /// Product title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price in BRL.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Absolute URL of the product page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true if the title could not be extracted.
    pub fn is_unnamed(&self) -> bool {
        self.name == TEXT_SENTINEL
    }
}

fn non_blank(value: String) -> String {
    if value.trim().is_empty() {
        TEXT_SENTINEL.to_string()
    } else {
        value
    }
}
