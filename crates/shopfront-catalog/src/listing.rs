//! Paginated listing orchestration.
//!
//! A [`ListingController`] drives one listing context (the general catalog
//! page, a search page, or a category page): it serializes the filter
//! state, consults its own [`ResponseCache`], fetches on miss, normalizes
//! every record, and exposes page state to the view. The controller owns
//! its cache — created with the controller, dropped with it — so separate
//! contexts never share entries.
//!
//! ## Overlapping loads
//!
//! Filter changes can overlap an in-flight fetch. The controller applies
//! last-request-wins: [`ListingController::begin_load`] hands out a
//! generation number and [`ListingController::complete_load`] ignores any
//! result whose generation is no longer current. In-flight requests are
//! never aborted, just discarded on arrival.

use std::time::Duration;

use shopfront_core::{build_query, canonical_key, DisplayProduct, FilterState};

use crate::cache::ResponseCache;
use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::normalize::normalize_product;
use crate::types::ProductPage;

/// Which endpoint a controller instance reads from.
#[derive(Debug, Clone)]
pub enum ListingSource {
    /// `GET /products` — the global catalog listing.
    All,
    /// `GET /products/search` with the given keyword.
    Search(String),
    /// `GET /categories/{id}` — the category-scoped listing variant.
    Category(i64),
}

/// View-facing lifecycle of a listing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Cache behavior for a single load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Serve from cache when a fresh entry exists.
    UseCache,
    /// Skip the cache read and overwrite the entry after fetching. Used
    /// after mutating admin operations.
    Force,
}

/// Client-side re-sort orders over an already-fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    OldestFirst,
    NewestFirst,
}

/// One normalized page of results plus its pagination state.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub products: Vec<DisplayProduct>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub page_size: u32,
}

/// Controller for one listing context. See the module docs.
pub struct ListingController {
    client: CatalogClient,
    source: ListingSource,
    image_base: String,
    cache: ResponseCache<ListingPage>,
    phase: ListingPhase,
    /// Last successfully loaded page. Kept through failed refreshes so the
    /// view never blanks out on a transient error.
    page: Option<ListingPage>,
    error: Option<CatalogError>,
    generation: u64,
}

impl ListingController {
    #[must_use]
    pub fn new(
        client: CatalogClient,
        source: ListingSource,
        image_base: impl Into<String>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client,
            source,
            image_base: image_base.into(),
            cache: ResponseCache::new(cache_ttl),
            phase: ListingPhase::Idle,
            page: None,
            error: None,
            generation: 0,
        }
    }

    /// Runs one full load cycle for `filter`, serving from cache when
    /// possible. Equivalent to [`ListingController::load_with`] using
    /// [`Refresh::UseCache`].
    pub async fn load(&mut self, filter: &FilterState) {
        self.load_with(filter, Refresh::UseCache).await;
    }

    /// Runs one full load cycle: `Loading`, then `Ready` or `Error`.
    ///
    /// On success the page is cached under the filter's canonical key and
    /// exposed via [`ListingController::page`]. On failure the previous
    /// page, if any, stays visible and the error is surfaced separately;
    /// calling again is the retry.
    pub async fn load_with(&mut self, filter: &FilterState, refresh: Refresh) {
        let generation = self.begin_load();
        let params = build_query(filter);
        let key = canonical_key(&params);

        if refresh == Refresh::UseCache {
            if let Some(page) = self.cache.get(&key) {
                self.complete_load(generation, Ok(page));
                return;
            }
        }

        let result = self.fetch_listing(&params).await;
        if generation == self.generation {
            if let Ok(page) = &result {
                self.cache.set(key, page.clone());
            }
        }
        self.complete_load(generation, result);
    }

    /// Marks the start of a load and returns its generation number.
    ///
    /// Exposed together with [`ListingController::complete_load`] for
    /// callers that drive fetches concurrently (e.g. a UI task spawning one
    /// fetch per filter change); [`ListingController::load_with`] wraps the
    /// pair for the sequential case.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ListingPhase::Loading;
        self.generation
    }

    /// Applies a finished fetch if `generation` is still current; results
    /// from superseded loads are discarded.
    pub fn complete_load(
        &mut self,
        generation: u64,
        result: Result<ListingPage, CatalogError>,
    ) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding result of superseded load"
            );
            return;
        }
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
                self.phase = ListingPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing fetch failed");
                self.error = Some(err);
                self.phase = ListingPhase::Error;
            }
        }
    }

    /// Fetches and normalizes one page from this controller's source,
    /// bypassing the cache.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from the underlying request.
    pub async fn fetch_listing(
        &self,
        params: &[(String, String)],
    ) -> Result<ListingPage, CatalogError> {
        let raw = match &self.source {
            ListingSource::All => self.client.fetch_products(params).await?,
            ListingSource::Search(query) => self.client.search_products(query, params).await?,
            ListingSource::Category(id) => {
                // The category endpoint embeds its full listing rather than
                // paginating server-side; present it as a single page.
                let detail = self.client.fetch_category(*id).await?;
                let total = detail.products.len();
                ProductPage {
                    content: detail.products,
                    current_page: 1,
                    total_pages: 1,
                    total_elements: total as u64,
                    page_size: u32::try_from(total).unwrap_or(u32::MAX),
                }
            }
        };
        Ok(self.normalize_page(raw))
    }

    fn normalize_page(&self, raw: ProductPage) -> ListingPage {
        ListingPage {
            products: raw
                .content
                .into_iter()
                .map(|product| normalize_product(product, &self.image_base))
                .collect(),
            current_page: raw.current_page,
            total_pages: raw.total_pages,
            total_elements: raw.total_elements,
            page_size: raw.page_size,
        }
    }

    /// Drops the cache entry for `filter`, forcing the next cached load to
    /// fetch. Called after a mutating operation that touched matching
    /// products.
    pub fn invalidate(&mut self, filter: &FilterState) {
        let key = canonical_key(&build_query(filter));
        self.cache.invalidate(&key);
    }

    /// Drops every cache entry for this context.
    pub fn invalidate_all(&mut self) {
        self.cache.invalidate_all();
    }

    #[must_use]
    pub fn phase(&self) -> ListingPhase {
        self.phase
    }

    /// Last successfully loaded page, if any. Survives failed refreshes.
    #[must_use]
    pub fn page(&self) -> Option<&ListingPage> {
        self.page.as_ref()
    }

    /// Products of the last good page; empty before the first success.
    #[must_use]
    pub fn products(&self) -> &[DisplayProduct] {
        self.page.as_ref().map_or(&[], |page| &page.products)
    }

    /// Error from the most recent failed load; cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    /// Re-sorts the already-fetched page by creation date, client-side.
    ///
    /// Returns a new sequence; the stored page is never mutated. The sort
    /// is stable: products with equal (or missing) timestamps keep their
    /// server-given relative order.
    #[must_use]
    pub fn page_sorted_by_date(&self, order: DateOrder) -> Vec<DisplayProduct> {
        let mut products = self.products().to_vec();
        match order {
            DateOrder::OldestFirst => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            DateOrder::NewestFirst => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        products
    }

    /// Products of the current page with stock remaining, judged by the
    /// computed stock total rather than any raw flag.
    #[must_use]
    pub fn in_stock_products(&self) -> Vec<&DisplayProduct> {
        self.products()
            .iter()
            .filter(|product| product.is_in_stock())
            .collect()
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
