//! Catalog backend contract.

use async_trait::async_trait;

use crate::catalog::{
    AnalyzeResult, ImageFile, Product, ProductDraft, ProductRegistration, ProductSummary,
    RegisterResult,
};
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::SearchQuery;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Operations offered by the catalog backend.
///
/// Every call is a single request/response cycle: no retries, no caching,
/// no internal timeout.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Ask the backend to write a detailed description for a draft.
    async fn analyze_product(
        &self,
        draft: &ProductDraft,
        images: &[ImageFile],
    ) -> CatalogResult<AnalyzeResult>;

    /// Persist a product.
    async fn register_product(
        &self,
        registration: &ProductRegistration,
        images: &[ImageFile],
    ) -> CatalogResult<RegisterResult>;

    /// Search products by sentence and keywords.
    async fn search_products(&self, query: &SearchQuery) -> CatalogResult<Vec<ProductSummary>>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product>;
}
