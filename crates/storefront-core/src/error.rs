//! Storefront error types.

use thiserror::Error;

/// Boxed source error from a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by catalog backend operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Non-2xx response. The message comes from the error body when it has
    /// one, otherwise from the operation's fallback text.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, connect, TLS, I/O).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A 2xx body that could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A 2xx body that decoded but lacks the expected envelope fields.
    #[error("{0}")]
    UnexpectedShape(String),

    /// The request could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl CatalogError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error came from the transport rather than the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

/// Errors raised by page state before or after talking to the backend.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Required form input is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Too many pending images.
    #[error("이미지는 최대 {max}개까지 업로드할 수 있습니다.")]
    TooManyImages { max: usize },

    /// Index outside the pending image list.
    #[error("Image index {index} out of range ({len} pending)")]
    ImageIndexOutOfRange { index: usize, len: usize },

    /// Product option not offered by the product.
    #[error("Option not found: {0}")]
    OptionNotFound(String),

    /// Search hit not in the current results.
    #[error("Product not in results: {0}")]
    ProductNotInResults(String),

    /// Backend failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
