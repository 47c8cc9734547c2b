//! Client-side page state building blocks.

mod fetch;
mod images;
mod keywords;

pub use fetch::FetchState;
pub use images::{PendingImage, PendingImages, PreviewHandle, PreviewRegistry, MAX_PENDING_IMAGES};
pub use keywords::KeywordList;
