//! Per-entity adapters for the list fetch.
//!
//! A `Catalog` decides which endpoint a listing hits for the given criteria,
//! where the records sit in the response, and how fetched records are
//! narrowed and ordered before they are shown.

use std::collections::BTreeSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::filter::FilterCriteria;
use crate::query::{Record, RecordQueryBuilder, SortField, Sortable};
use crate::remote::ListRequest;
use crate::types::{EntityKind, Facet, Project, Talent};
use crate::utils::text::eq_case_insensitive;

pub const TALENT_PAGE_SIZE: usize = 20;
pub const PROJECT_PAGE_SIZE: usize = 12;

pub const NO_TALENT_MESSAGE: &str =
    "No talent with the specified criteria was found. Please try different search options.";

/// Records left after local processing
#[derive(Debug, Clone, PartialEq)]
pub struct Processed<T> {
    pub items: Vec<T>,
    /// Records dropped because their cohort is hidden
    pub hidden: usize,
}

/// Adapter between the generic list controller and one entity type
pub trait Catalog: Send + Sync + 'static {
    type Item: Record + Sortable + DeserializeOwned + Serialize + Clone + Send + Sync + 'static;

    fn kind(&self) -> EntityKind;

    /// Request to send for `criteria`
    fn request(&self, criteria: &FilterCriteria) -> ListRequest;

    /// Key the collection sits under when the response is an object
    fn collection_key(&self) -> &'static str;

    fn page_size(&self) -> usize;

    fn sort_field(&self) -> SortField;

    /// Message for a successful fetch that left nothing to show
    fn empty_message(&self, _hidden: usize) -> String {
        format!(
            "No {} match the specified criteria. Please try different search options.",
            self.kind().plural()
        )
    }

    /// Whether a fetched record may be shown at all
    fn is_visible(&self, _item: &Self::Item) -> bool {
        true
    }

    /// Drop hidden records, re-apply the criteria locally, then sort
    fn post_process(
        &self,
        items: Vec<Self::Item>,
        criteria: &FilterCriteria,
    ) -> Processed<Self::Item> {
        let before = items.len();
        let visible: Vec<Self::Item> = items.into_iter().filter(|i| self.is_visible(i)).collect();
        let hidden = before - visible.len();

        let query = RecordQueryBuilder::from_criteria(criteria)
            .with_sort(self.sort_field())
            .build();
        Processed {
            items: query.apply(visible),
            hidden,
        }
    }
}

/// Talents: server-side query endpoint plus local re-filtering
#[derive(Debug, Clone)]
pub struct TalentCatalog {
    page_size: usize,
    hidden_cohorts: BTreeSet<String>,
}

impl TalentCatalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            hidden_cohorts: BTreeSet::new(),
        }
    }

    /// Cohorts whose talents never appear in listings
    pub fn with_hidden_cohorts<I, S>(mut self, cohorts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_cohorts = cohorts
            .into_iter()
            .map(Into::into)
            .filter(|c: &String| !c.trim().is_empty())
            .collect();
        self
    }

    pub fn hidden_cohorts(&self) -> impl Iterator<Item = &str> {
        self.hidden_cohorts.iter().map(String::as_str)
    }
}

impl Default for TalentCatalog {
    fn default() -> Self {
        Self::new(TALENT_PAGE_SIZE)
    }
}

impl Catalog for TalentCatalog {
    type Item = Talent;

    fn kind(&self) -> EntityKind {
        EntityKind::Talent
    }

    /// `/talent-query` with the active parameters, or `/talents` when none
    fn request(&self, criteria: &FilterCriteria) -> ListRequest {
        let mut params = ListRequest::new("/talent-query");

        if let Some(text) = criteria.search_query() {
            params = params.with_param(&criteria.search_field.to_string(), text);
        }
        for facet in [Facet::Skills, Facet::Roles] {
            let joined = criteria.selected(facet).collect::<Vec<_>>().join(",");
            params = params.with_param(facet.param_name(), &joined);
        }
        for facet in [Facet::Availability, Facet::Cohort] {
            if let Some(value) = criteria.single(facet) {
                params = params.with_param(facet.param_name(), value);
            }
        }

        if params.has_params() {
            params
        } else {
            ListRequest::new("/talents")
        }
    }

    fn collection_key(&self) -> &'static str {
        "portfolios"
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn sort_field(&self) -> SortField {
        SortField::Name
    }

    fn empty_message(&self, hidden: usize) -> String {
        if hidden > 0 {
            let cohorts = self.hidden_cohorts().collect::<Vec<_>>().join(", ");
            format!(
                "{cohorts} talents are not available for this search. \
                 Please try a different cohort."
            )
        } else {
            NO_TALENT_MESSAGE.to_string()
        }
    }

    fn is_visible(&self, item: &Talent) -> bool {
        match item.cohort.as_deref() {
            Some(cohort) => !self
                .hidden_cohorts
                .iter()
                .any(|hidden| eq_case_insensitive(hidden.trim(), cohort.trim())),
            None => true,
        }
    }
}

/// Projects: the full list is fetched and filtered locally
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    page_size: usize,
    sort_by: SortField,
}

impl ProjectCatalog {
    /// Newest projects first by default
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            sort_by: SortField::Newest,
        }
    }

    pub fn with_sort(mut self, sort_by: SortField) -> Self {
        self.sort_by = sort_by;
        self
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::new(PROJECT_PAGE_SIZE)
    }
}

impl Catalog for ProjectCatalog {
    type Item = Project;

    fn kind(&self) -> EntityKind {
        EntityKind::Project
    }

    fn request(&self, _criteria: &FilterCriteria) -> ListRequest {
        ListRequest::new("/projects")
    }

    fn collection_key(&self) -> &'static str {
        "projects"
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn sort_field(&self) -> SortField {
        self.sort_by
    }
}
