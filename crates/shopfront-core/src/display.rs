use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the storefront category taxonomy.
///
/// Categories form a tree via `parent_id`; children are never embedded and
/// are fetched one level at a time. `level` is stored explicitly by the
/// backend and treated as authoritative input data, not re-derived from
/// ancestry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// `None` for root categories.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Depth in the tree as reported by the backend (0 for roots).
    #[serde(default)]
    pub level: i32,
}

/// A catalog product normalized for display, with all aggregate fields
/// resolved up front so view code never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayProduct {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    /// Sale price; equals `price` when no discount applies.
    pub discounted_price: f64,
    /// Whole-percent discount. `0` when the product is not on sale.
    pub discount_percent: u32,
    /// Fully resolved image URL (absolute, or placeholder).
    pub image_url: String,
    /// Mean of all rating entries, rounded to one decimal. `0.0` when the
    /// product has no ratings.
    pub rating_avg: f64,
    /// Number of rating entries.
    pub rating_count: usize,
    /// Sum of per-size stock quantities. `0` when the product has no sizes.
    pub total_stock: i64,
    pub category: Option<Category>,
    pub sizes: Vec<SizeOption>,
    pub colors: Vec<ColorOption>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A selectable size of a [`DisplayProduct`] and its remaining stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeOption {
    pub name: String,
    pub quantity: i64,
}

/// A selectable color of a [`DisplayProduct`] and its photo set, with every
/// photo reference already resolved to an absolute URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub photos: Vec<String>,
}

impl DisplayProduct {
    /// Returns `true` if any size has stock remaining.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.total_stock > 0
    }

    /// Returns `true` if the product is currently on sale.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_percent > 0
    }

    /// Returns the number of size options, including sold-out ones.
    #[must_use]
    pub fn size_count(&self) -> usize {
        self.sizes.len()
    }
}

impl SizeOption {
    /// Sold-out sizes stay in the list but are rendered disabled.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.quantity > 0
    }
}
