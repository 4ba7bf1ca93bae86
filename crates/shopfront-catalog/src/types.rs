//! Raw response types for the storefront catalog REST API.
//!
//! ## Leniency
//!
//! The API omits or nulls fields freely depending on which admin screen last
//! touched a record, so everything beyond the identifying fields carries
//! `#[serde(default)]`. A paginated response missing the whole `content`
//! array decodes as an empty page rather than failing.
//!
//! ## `discountPercent`
//!
//! Stored explicitly by the backend but not always kept in sync with
//! `price`/`discountedPrice` (older admin screens recompute it, newer ones
//! don't). The explicit value wins during normalization; it is derived only
//! when absent. See [`crate::normalize`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shopfront_core::Category;

/// Paginated envelope returned by `GET /products` and `GET /products/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Records for the requested page. Defaults to empty when the backend
    /// omits the field (observed on out-of-range page numbers).
    #[serde(default)]
    pub content: Vec<RawProduct>,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub page_size: u32,
}

/// A single product as returned by the catalog endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    /// List price. `0` has been observed on draft records.
    #[serde(default)]
    pub price: f64,

    /// Sale price; absent when the product is not on sale.
    #[serde(default)]
    pub discounted_price: Option<f64>,

    /// Whole-percent discount as stored by the backend. May disagree with
    /// the price pair; never "fixed" here.
    #[serde(default)]
    pub discount_percent: Option<u32>,

    #[serde(default)]
    pub category: Option<Category>,

    /// Color variants in display order. The first variant's first photo is
    /// the canonical thumbnail by storefront convention.
    #[serde(default)]
    pub color_variants: Vec<ColorVariant>,

    #[serde(default)]
    pub size_variants: Vec<SizeVariant>,

    #[serde(default)]
    pub ratings: Vec<RatingEntry>,

    /// Legacy top-level image reference, kept for records created before
    /// color variants existed. Used as a fallback when no variant photo is
    /// present.
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A color variant and its ordered photo set.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorVariant {
    pub name: String,
    /// Image references; either absolute (`http`-prefixed) or relative to
    /// the configured image base path.
    #[serde(default)]
    pub photos: Vec<String>,
}

/// A size variant and its stock quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeVariant {
    pub name: String,
    /// May be `0` or negative for sold-out sizes; such sizes stay listed
    /// but are not selectable.
    #[serde(default)]
    pub quantity: i64,
}

/// One user's rating of a product, 0–5 in half-step precision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub user_id: i64,
    pub rating: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `GET /categories/{id}`: the category itself plus its
/// product listing embedded as `products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

impl CategoryDetail {
    /// The category fields without the embedded listing.
    #[must_use]
    pub fn category(&self) -> Category {
        Category {
            id: self.id,
            name: self.name.clone(),
            parent_id: self.parent_id,
            level: self.level,
        }
    }
}

fn default_page() -> u32 {
    1
}
