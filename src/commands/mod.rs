mod config;
mod projects;
mod talents;

pub use config::{cmd_config_init, cmd_config_path, cmd_config_show};
pub use projects::{ProjectListOptions, cmd_projects_ls};
pub use talents::{TalentListOptions, cmd_talent_show, cmd_talents_ls};

use serde_json::{Value, json};

use crate::browse::{BrowseAction, BrowseViewModel, Browser};
use crate::catalog::Catalog;
use crate::cli::{GlobalOptions, OutputOptions};
use crate::config::Config;
use crate::error::{DirectoryError, Result};
use crate::filter::FilterCriteria;
use crate::remote::HttpClient;

/// Result of a command, printable as text or JSON
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested, otherwise the text (falling back to JSON)
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load the configuration with the command-line overrides applied
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    let path = Config::resolve_path(global.config.as_deref())?;
    let mut config = Config::load(&path)?;
    if let Some(url) = &global.api_url {
        config.override_base_url(url)?;
    }
    Ok(config)
}

/// HTTP client for the configured directory API
pub fn build_client(config: &Config) -> Result<HttpClient> {
    HttpClient::new(&config.api.base_url, config.timeout())
}

/// Fetch a listing through the browse driver and land on `page`.
/// A failed fetch becomes an error carrying the inline message.
pub(crate) async fn browse_page<K: Catalog>(
    catalog: K,
    config: &Config,
    criteria: FilterCriteria,
    page: usize,
) -> Result<BrowseViewModel<K::Item>> {
    let client = build_client(config)?;
    let mut browser =
        Browser::new(catalog, client, config.settle_delay()).with_criteria(criteria);
    browser.refresh().await;
    browser.dispatch(BrowseAction::GoToPage(page));

    let view = browser.view_model();
    if view.can_retry {
        return Err(DirectoryError::FetchFailed(
            view.message.unwrap_or_else(|| "Failed to load the listing.".to_string()),
        ));
    }
    Ok(view)
}

/// JSON shape shared by both listings
pub(crate) fn listing_json<T: serde::Serialize>(view: &BrowseViewModel<T>) -> Value {
    let filters: Vec<String> = view.chips.iter().map(|c| c.label()).collect();
    json!({
        "items": view.items,
        "page": view.pagination.current_page,
        "total_pages": view.pagination.total_pages,
        "total": view.pagination.total_items,
        "filters": filters,
        "message": view.message,
    })
}
