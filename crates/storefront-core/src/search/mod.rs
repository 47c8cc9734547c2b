//! Product search types.

mod query;
mod results;

pub use query::SearchQuery;
pub use results::SearchHit;
