//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod product;
pub mod register;
pub mod search;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use storefront_core::pages::RegistrationForm;
use storefront_core::state::{FetchState, PendingImages};
use storefront_core::StorefrontError;

use crate::context::Context;
use crate::files::read_image;
use crate::output::format_bytes;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search sentence.
    pub query: String,

    /// Keyword to narrow the search (repeatable).
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Mark a result as liked (repeatable).
    #[arg(long)]
    pub like: Vec<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Option to select (default: the first option).
    #[arg(short, long)]
    pub option: Option<String>,

    /// Quantity to price.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Product fields shared by analyze and register.
#[derive(Args)]
pub struct DraftArgs {
    /// Product name.
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// One-line description.
    #[arg(short = 's', long = "short-description", default_value = "")]
    pub short_description: String,

    /// Keyword (repeatable).
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Category.
    #[arg(long, default_value = "")]
    pub category: String,

    /// Price in won.
    #[arg(short, long, default_value = "")]
    pub price: String,

    /// Image file (repeatable, at most 5).
    #[arg(short, long = "image")]
    pub images: Vec<PathBuf>,
}

impl DraftArgs {
    /// Fill a registration form, reading image files from disk.
    pub fn into_form(self, ctx: &Context) -> Result<RegistrationForm> {
        let mut form = RegistrationForm::new();
        form.name = self.name;
        form.short_description = self.short_description;
        form.category = self.category;
        form.price_input = self.price;
        form.images = PendingImages::new(ctx.previews.clone());
        for keyword in self.keywords {
            form.keyword_input = keyword;
            form.commit_keyword();
        }

        let files = self
            .images
            .iter()
            .map(|path| read_image(&ctx.resolve_path(path)))
            .collect::<Result<Vec<_>>>()?;
        let selected = files.len();
        let added = form.add_images(files)?;
        if added < selected {
            ctx.output
                .warn(&format!("{} non-image file(s) skipped", selected - added));
        }
        for pending in form.images.iter() {
            ctx.output.debug(&format!(
                "{} ({}, {})",
                pending.file.file_name,
                pending.file.content_type,
                format_bytes(pending.file.len() as u64)
            ));
        }

        Ok(form)
    }
}

/// Surface the page's failure text rather than the bare backend error.
pub fn fail_with_page_message<T, S>(
    result: Result<T, StorefrontError>,
    state: &FetchState<S>,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => match state.error() {
            Some(message) => Err(anyhow::anyhow!(message.to_string())),
            None => Err(e.into()),
        },
    }
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub draft: DraftArgs,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    /// Detailed description (HTML).
    #[arg(short, long)]
    pub detailed_description: Option<String>,

    /// Generate the detailed description with AI before registering.
    #[arg(long)]
    pub analyze: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the registration payload without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
