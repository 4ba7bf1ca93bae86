//! Filter state and its canonical query-parameter form.
//!
//! [`FilterState`] is the single typed representation of every listing
//! filter the UI offers. [`build_query`] is the only place that converts it
//! to wire format, so the request parameters and the cache key can never
//! diverge. The canonical form is order-independent: parameters are sorted
//! by name before serialization.

/// Stock filter as presented by the UI.
///
/// Maps to a boolean `stock` query parameter; [`StockFilter::Any`] omits the
/// parameter entirely so the server applies no stock filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockFilter {
    #[default]
    Any,
    InStock,
    OutOfStock,
}

/// Server-side sort orders offered by the listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    Newest,
    Oldest,
    Rating,
}

impl SortKey {
    /// Wire value for the `sort` query parameter.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Rating => "rating",
        }
    }
}

/// Complete filter state for one listing page.
///
/// Owned by the page-level caller; only [`build_query`] turns it into
/// request parameters. Unset optional fields are omitted from the wire form
/// rather than sent as empty parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Minimum discount percent, e.g. `Some(20)` for "20% off or more".
    pub min_discount: Option<u32>,
    pub stock: StockFilter,
    pub color: Option<String>,
    pub size: Option<String>,
    pub sort: Option<SortKey>,
    /// 1-based page number. Always sent.
    pub page: u32,
    /// Always sent; affects the result set, so it is part of the cache key.
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_price: None,
            max_price: None,
            min_discount: None,
            stock: StockFilter::Any,
            color: None,
            size: None,
            sort: None,
            page: 1,
            page_size: 12,
        }
    }
}

/// Builds the canonical query-parameter sequence for `state`.
///
/// Only non-empty fields are included; `page` and `pageSize` are always
/// present. The result is sorted by parameter name, so two states that
/// normalize to the same field set produce an identical sequence regardless
/// of how the state was assembled.
#[must_use]
pub fn build_query(state: &FilterState) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::with_capacity(9);

    if let Some(min_price) = state.min_price {
        params.push(("minPrice".to_string(), format_number(min_price)));
    }
    if let Some(max_price) = state.max_price {
        params.push(("maxPrice".to_string(), format_number(max_price)));
    }
    if let Some(min_discount) = state.min_discount {
        params.push(("minDiscount".to_string(), min_discount.to_string()));
    }
    match state.stock {
        StockFilter::Any => {}
        StockFilter::InStock => params.push(("stock".to_string(), "true".to_string())),
        StockFilter::OutOfStock => params.push(("stock".to_string(), "false".to_string())),
    }
    if let Some(color) = state.color.as_deref().filter(|c| !c.is_empty()) {
        params.push(("color".to_string(), color.to_string()));
    }
    if let Some(size) = state.size.as_deref().filter(|s| !s.is_empty()) {
        params.push(("size".to_string(), size.to_string()));
    }
    if let Some(sort) = state.sort {
        params.push(("sort".to_string(), sort.as_param().to_string()));
    }
    params.push(("page".to_string(), state.page.to_string()));
    params.push(("pageSize".to_string(), state.page_size.to_string()));

    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

/// Joins a canonical parameter sequence into the cache-key string.
///
/// Assumes `params` is already canonical (sorted, non-empty values), which
/// [`build_query`] guarantees.
#[must_use]
pub fn canonical_key(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Formats a price bound without a trailing `.0` for whole values, so
/// `500.0` serializes as `500` the way the UI entered it.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
