//! Search query builder.

use serde::{Deserialize, Serialize};

/// A product search: a free-text sentence plus optional keywords.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    /// Sentence the user typed.
    pub query: String,
    /// Keywords the user added, in order.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SearchQuery {
    /// Create a new search query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            keywords: Vec::new(),
        }
    }

    /// Set the keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Check if keywords were supplied.
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Keywords joined into the single `keywords` parameter value.
    ///
    /// Returns `None` when there are no keywords so the parameter is left
    /// out of the request entirely.
    pub fn keywords_param(&self, separator: &str) -> Option<String> {
        if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.join(separator))
        }
    }
}
