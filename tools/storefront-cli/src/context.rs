//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_client::CatalogClient;
use storefront_core::state::PreviewRegistry;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Tracks image previews held by forms built in this run.
    pub previews: PreviewRegistry,
}

impl Context {
    /// Load context from a config file or the nearest one up the tree.
    ///
    /// `[output] json = true` in the config turns on JSON output even
    /// without `--json`.
    pub fn load(config_path: Option<&str>, verbose: bool, json: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let output = Output::new(verbose, json || config.output.json);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            previews: PreviewRegistry::new(),
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Build a backend client from the effective configuration.
    pub fn client(&self) -> CatalogClient {
        let config = self.config.client_config();
        self.output.debug(&format!("API base URL: {}", config.base_url));
        CatalogClient::new(config)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
