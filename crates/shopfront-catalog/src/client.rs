//! HTTP client for the storefront catalog REST API.
//!
//! Wraps `reqwest` with catalog-specific error handling and typed response
//! deserialization. 404s surface as [`CatalogError::NotFound`], any other
//! non-2xx status as [`CatalogError::UnexpectedStatus`]; body parse
//! failures carry the request context.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use shopfront_core::{AppConfig, Category};

use crate::error::CatalogError;
use crate::types::{CategoryDetail, ProductPage, RawProduct};

/// Client for the storefront catalog endpoints.
///
/// Cheap to clone; clones share the underlying connection pool. Point
/// `base_url` at a wiremock server in tests.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one page of the general product listing.
    ///
    /// `params` is the canonical query sequence produced by
    /// [`shopfront_core::build_query`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::UnexpectedStatus`] on a non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body does not match the
    ///   expected page shape.
    pub async fn fetch_products(
        &self,
        params: &[(String, String)],
    ) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint_url("products", params);
        self.get_json(url, "products listing").await
    }

    /// Searches products by keyword, with the same filter contract and
    /// paginated shape as the general listing.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_products`].
    pub async fn search_products(
        &self,
        query: &str,
        params: &[(String, String)],
    ) -> Result<ProductPage, CatalogError> {
        let mut url = self.endpoint_url("products/search", params);
        url.query_pairs_mut().append_pair("query", query);
        self.get_json(url, &format!("product search \"{query}\"")).await
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for an unknown id, plus the usual
    /// network/status/parse failures.
    pub async fn fetch_product(&self, id: i64) -> Result<RawProduct, CatalogError> {
        let url = self.endpoint_url(&format!("products/{id}"), &[]);
        self.get_json(url, &format!("product {id}")).await
    }

    /// Fetches a category together with its embedded product listing.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for an unknown id, plus the usual
    /// network/status/parse failures.
    pub async fn fetch_category(&self, id: i64) -> Result<CategoryDetail, CatalogError> {
        let url = self.endpoint_url(&format!("categories/{id}"), &[]);
        self.get_json(url, &format!("category {id}")).await
    }

    /// Fetches the direct children of a category.
    ///
    /// A leaf category yields `Ok(vec![])`; an unknown parent id yields
    /// [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the parent id does not exist.
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body is not a category array.
    pub async fn fetch_children(&self, id: i64) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint_url(&format!("categories/{id}/children"), &[]);
        self.get_json(url, &format!("children of category {id}")).await
    }

    /// Builds the full request URL for `path` with percent-encoded query
    /// parameters appended via [`Url::query_pairs_mut`].
    fn endpoint_url(&self, path: &str, params: &[(String, String)]) -> Url {
        // The base URL is normalised with a trailing slash at construction,
        // and the paths used here are relative, so join cannot fail.
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, maps 404/non-2xx to typed errors, and parses
    /// the body as JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        tracing::debug!(%url, "catalog request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
