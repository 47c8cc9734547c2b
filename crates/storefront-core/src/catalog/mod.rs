//! Product catalog types.

mod draft;
mod product;

pub use draft::*;
pub use product::*;
