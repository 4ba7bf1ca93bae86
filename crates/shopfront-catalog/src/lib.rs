pub mod cache;
pub mod client;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod tree;
pub mod types;

pub use cache::ResponseCache;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use listing::{DateOrder, ListingController, ListingPage, ListingPhase, ListingSource, Refresh};
pub use normalize::normalize_product;
pub use tree::CategoryTree;
pub use types::{CategoryDetail, ProductPage, RawProduct};
