//! Lazy, per-level access to the category taxonomy.
//!
//! Navigation menus reveal the tree one level at a time: expanding a node
//! fetches only that node's direct children. Results are deliberately not
//! cached here — taxonomy data changes rarely, a hover re-fetch is cheap,
//! and skipping a cache keeps the accessor trivially fresh. Repeated calls
//! for the same id are idempotent, and sibling expansions may run
//! concurrently with no ordering between them.

use shopfront_core::Category;

use crate::client::CatalogClient;
use crate::error::CatalogError;

/// Accessor for one level of the category tree at a time.
pub struct CategoryTree {
    client: CatalogClient,
}

impl CategoryTree {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Returns the direct children of `parent_id`.
    ///
    /// A leaf category returns an empty vector, not an error; an unknown
    /// parent id is a [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from the underlying request.
    pub async fn children(&self, parent_id: i64) -> Result<Vec<Category>, CatalogError> {
        self.client.fetch_children(parent_id).await
    }

    /// Like [`CategoryTree::children`], but treats an unknown parent as
    /// having no children. Used by menu rendering, where a category deleted
    /// mid-session should collapse silently rather than error.
    ///
    /// # Errors
    ///
    /// Propagates network, status, and parse errors; only
    /// [`CatalogError::NotFound`] is converted to an empty result.
    pub async fn children_or_empty(&self, parent_id: i64) -> Result<Vec<Category>, CatalogError> {
        match self.client.fetch_children(parent_id).await {
            Ok(children) => Ok(children),
            Err(err) if err.is_not_found() => {
                tracing::debug!(parent_id, "parent category gone; treating as leaf");
                Ok(vec![])
            }
            Err(err) => Err(err),
        }
    }
}
