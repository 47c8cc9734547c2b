//! Catalog domain types and page state for the storefront.
//!
//! This crate holds everything the storefront knows about products without
//! knowing how they travel over the wire:
//!
//! - **Catalog**: Products, options, images, registration drafts
//! - **Search**: Queries and result hits with client-side likes
//! - **State**: Keyword lists, pending image uploads, fetch progress
//! - **Pages**: Home, search, product detail and registration state models
//!
//! The HTTP layer lives in `storefront-client`, which implements
//! [`CatalogApi`] for the real backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_core::prelude::*;
//!
//! let mut page = SearchPage::new("설날 선물");
//! page.keywords_mut().add("과일");
//! page.run(&client).await;
//!
//! if let FetchState::Loaded(hits) = page.state() {
//!     for hit in hits {
//!         println!("{} {}", hit.product.name, hit.product.price);
//!     }
//! }
//! ```

pub mod api;
pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod pages;
pub mod search;
pub mod state;

pub use api::{CatalogApi, CatalogResult};
pub use error::{CatalogError, StorefrontError};
pub use ids::*;
pub use money::Won;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{CatalogApi, CatalogResult};
    pub use crate::error::{CatalogError, StorefrontError};
    pub use crate::ids::*;
    pub use crate::money::Won;

    // Catalog
    pub use crate::catalog::{
        AnalyzeResult, ImageFile, Product, ProductDraft, ProductImage, ProductOption,
        ProductRegistration, ProductSummary, RegisterResult,
    };

    // Search
    pub use crate::search::{SearchHit, SearchQuery};

    // State
    pub use crate::state::{FetchState, KeywordList, PendingImages, PreviewHandle, PreviewRegistry};

    // Pages
    pub use crate::pages::{HomePage, ProductPage, RegisterPage, RegistrationForm, SearchPage};
}
