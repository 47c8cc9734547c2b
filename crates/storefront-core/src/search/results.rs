//! Search result hits.

use serde::Serialize;

use crate::catalog::ProductSummary;

/// A search result as shown on the results page.
///
/// `liked` lives only in the client and is never sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub product: ProductSummary,
    pub liked: bool,
}

impl SearchHit {
    /// Wrap a summary with the like flag cleared.
    pub fn new(product: ProductSummary) -> Self {
        Self {
            product,
            liked: false,
        }
    }

    /// Flip the like flag and return the new value.
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }
}

impl From<ProductSummary> for SearchHit {
    fn from(product: ProductSummary) -> Self {
        Self::new(product)
    }
}
