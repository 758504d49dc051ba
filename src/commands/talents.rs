use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, browse_page, build_client, listing_json, load_config};
use crate::catalog::TalentCatalog;
use crate::cli::{GlobalOptions, OutputOptions};
use crate::display::{format_page_footer, format_profile, talent_table};
use crate::error::{DirectoryError, Result};
use crate::fetch::{DetailController, DetailStatus};
use crate::filter::FilterCriteria;
use crate::types::{Facet, SearchField};

/// Criteria and page for `talents ls`
#[derive(Debug, Clone, Default)]
pub struct TalentListOptions {
    pub search: Option<String>,
    pub field: SearchField,
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub availability: Option<String>,
    pub cohort: Option<String>,
    pub page: usize,
}

impl TalentListOptions {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new()
            .with_search(self.search.clone().unwrap_or_default(), self.field)
            .with_values(Facet::Skills, self.skills.iter().cloned())?
            .with_values(Facet::Roles, self.roles.iter().cloned())?;
        if let Some(availability) = &self.availability {
            criteria = criteria.with_single(Facet::Availability, availability.clone())?;
        }
        if let Some(cohort) = &self.cohort {
            criteria = criteria.with_single(Facet::Cohort, cohort.clone())?;
        }
        Ok(criteria)
    }
}

/// List talents matching the given criteria
pub async fn cmd_talents_ls(
    global: &GlobalOptions,
    opts: TalentListOptions,
    output: OutputOptions,
) -> Result<()> {
    let config = load_config(global)?;
    let catalog = TalentCatalog::new(config.browse.talent_page_size)
        .with_hidden_cohorts(config.browse.hidden_cohorts.iter().cloned());

    let view = browse_page(catalog, &config, opts.criteria()?, opts.page.max(1)).await?;

    let text = if view.items.is_empty() {
        view.message
            .clone()
            .unwrap_or_else(|| "No talents found.".to_string())
    } else {
        let mut text = talent_table(&view.items);
        if let Some(footer) = format_page_footer(&view.pagination, "talents") {
            text.push('\n');
            text.push_str(&footer);
        }
        text
    };

    CommandOutput::new(listing_json(&view))
        .with_text(text)
        .print(output)
}

/// Show one talent's full profile
pub async fn cmd_talent_show(
    global: &GlobalOptions,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let config = load_config(global)?;
    let detail = DetailController::new(build_client(&config)?);

    detail.select(id).await;
    let snapshot = detail.snapshot();

    match (snapshot.status, snapshot.profile) {
        (DetailStatus::Loaded, Some(profile)) => {
            let text = format!("{}\n{}", id.cyan(), format_profile(&profile));
            CommandOutput::new(json!({ "id": id, "profile": profile }))
                .with_text(text)
                .print(output)
        }
        (DetailStatus::Failed(_), _) => Err(DirectoryError::FetchFailed(format!(
            "Failed to load the profile for '{id}'."
        ))),
        _ => Err(DirectoryError::FetchFailed(format!(
            "No profile found for '{id}'."
        ))),
    }
}
