use super::{CommandOutput, browse_page, listing_json, load_config};
use crate::catalog::ProjectCatalog;
use crate::cli::{GlobalOptions, OutputOptions};
use crate::display::{format_page_footer, project_table};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::query::SortField;
use crate::types::{Facet, ProjectType};

/// Criteria, order and page for `projects ls`
#[derive(Debug, Clone)]
pub struct ProjectListOptions {
    pub search: Option<String>,
    pub types: Vec<ProjectType>,
    pub tech: Vec<String>,
    pub sort: SortField,
    pub page: usize,
}

impl Default for ProjectListOptions {
    fn default() -> Self {
        Self {
            search: None,
            types: Vec::new(),
            tech: Vec::new(),
            sort: SortField::Newest,
            page: 1,
        }
    }
}

impl ProjectListOptions {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        FilterCriteria::new()
            .with_search(self.search.clone().unwrap_or_default(), Default::default())
            .with_values(Facet::ProjectTypes, self.types.iter().map(|t| t.to_string()))?
            .with_values(Facet::TechStack, self.tech.iter().cloned())
    }
}

/// List projects matching the given criteria
pub async fn cmd_projects_ls(
    global: &GlobalOptions,
    opts: ProjectListOptions,
    output: OutputOptions,
) -> Result<()> {
    let config = load_config(global)?;
    let catalog = ProjectCatalog::new(config.browse.project_page_size).with_sort(opts.sort);

    let view = browse_page(catalog, &config, opts.criteria()?, opts.page.max(1)).await?;

    let text = if view.items.is_empty() {
        view.message
            .clone()
            .unwrap_or_else(|| "No projects found.".to_string())
    } else {
        let mut text = project_table(&view.items);
        if let Some(footer) = format_page_footer(&view.pagination, "projects") {
            text.push('\n');
            text.push_str(&footer);
        }
        text
    };

    CommandOutput::new(listing_json(&view))
        .with_text(text)
        .print(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_become_facet_values() {
        let opts = ProjectListOptions {
            types: vec![ProjectType::Fintech, ProjectType::Marketing],
            tech: vec!["Rust".to_string()],
            ..Default::default()
        };
        let criteria = opts.criteria().unwrap();
        assert_eq!(
            criteria.selected(Facet::ProjectTypes).collect::<Vec<_>>(),
            vec!["FINTECH", "MARKERTING"]
        );
        assert_eq!(criteria.selected(Facet::TechStack).collect::<Vec<_>>(), vec!["Rust"]);
        assert_eq!(criteria.search_query(), None);
    }
}
