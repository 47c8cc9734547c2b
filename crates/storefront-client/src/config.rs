//! Client configuration.

use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://43.201.10.255:8080/api";

/// Environment variables consulted for the base URL, in priority order.
pub const BASE_URL_ENV_VARS: [&str; 2] = ["STOREFRONT_API_URL", "NEXT_PUBLIC_API_URL"];

/// Settings for [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, including any path prefix such as `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Separator placed between keywords in the search `keywords` parameter.
    ///
    /// Empty by default: the backend currently receives the keywords
    /// concatenated (`["a", "b"]` becomes `ab`).
    #[serde(default)]
    pub keyword_separator: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            keyword_separator: String::new(),
        }
    }
}

impl ClientConfig {
    /// Create a config for a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the keyword separator.
    pub fn with_keyword_separator(mut self, separator: impl Into<String>) -> Self {
        self.keyword_separator = separator.into();
        self
    }

    /// Default config with the base URL taken from the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Replace the base URL with the first non-empty environment override.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = BASE_URL_ENV_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
        {
            self.base_url = url;
        }
        self
    }
}
