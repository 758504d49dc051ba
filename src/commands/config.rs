//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config path`: Print where the config file lives
//! - `config init`: Write a config file with default values

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, load_config};
use crate::cli::{GlobalOptions, OutputOptions};
use crate::config::Config;
use crate::error::{DirectoryError, Result};

/// Show the effective configuration (file, environment and flags combined)
pub fn cmd_config_show(global: &GlobalOptions, output: OutputOptions) -> Result<()> {
    let path = Config::resolve_path(global.config.as_deref())?;
    let config = load_config(global)?;

    let json_output = json!({
        "api": {
            "base_url": config.api.base_url,
            "timeout_secs": config.api.timeout_secs,
        },
        "browse": {
            "talent_page_size": config.browse.talent_page_size,
            "project_page_size": config.browse.project_page_size,
            "settle_delay_ms": config.browse.settle_delay_ms,
            "hidden_cohorts": config.browse.hidden_cohorts,
        },
        "config_file": path.to_string_lossy(),
        "config_file_exists": path.exists(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "api".cyan()));
    text_output.push_str(&format!("  base_url: {}\n", config.api.base_url.green()));
    text_output.push_str(&format!("  timeout_secs: {}\n", config.api.timeout_secs));

    text_output.push('\n');

    text_output.push_str(&format!("{}:\n", "browse".cyan()));
    text_output.push_str(&format!(
        "  talent_page_size: {}\n",
        config.browse.talent_page_size
    ));
    text_output.push_str(&format!(
        "  project_page_size: {}\n",
        config.browse.project_page_size
    ));
    text_output.push_str(&format!(
        "  settle_delay_ms: {}\n",
        config.browse.settle_delay_ms
    ));
    if config.browse.hidden_cohorts.is_empty() {
        text_output.push_str(&format!("  hidden_cohorts: {}\n", "none".dimmed()));
    } else {
        text_output.push_str(&format!(
            "  hidden_cohorts: {}\n",
            config.browse.hidden_cohorts.join(", ")
        ));
    }

    text_output.push('\n');
    let suffix = if path.exists() { "" } else { " (not created)" };
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}{suffix}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Print the config file location
pub fn cmd_config_path(global: &GlobalOptions, output: OutputOptions) -> Result<()> {
    let path = Config::resolve_path(global.config.as_deref())?;
    CommandOutput::new(json!({
        "path": path.to_string_lossy(),
        "exists": path.exists(),
    }))
    .with_text(path.display().to_string())
    .print(output)
}

/// Write the default configuration to the config file
pub fn cmd_config_init(global: &GlobalOptions, force: bool, output: OutputOptions) -> Result<()> {
    let path = Config::resolve_path(global.config.as_deref())?;
    if path.exists() && !force {
        return Err(DirectoryError::Config(format!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;

    CommandOutput::new(json!({
        "action": "config_init",
        "path": path.to_string_lossy(),
        "success": true,
    }))
    .with_text(format!("Wrote {}", path.display().to_string().cyan()))
    .print(output)
}
