//! Predicate engine for filtering directory records.
//!
//! Each active part of a `FilterCriteria` becomes one `RecordFilter`; a
//! record passes a `RecordQuery` only when every filter accepts it (AND
//! across facets). Within a multi-select facet any selected value is enough
//! (OR within the facet). Entity types plug in through the `Record` trait,
//! which says which of their fields back which facet.

use crate::filter::FilterCriteria;
use crate::types::{Facet, Project, SearchField, Talent};
use crate::utils::text::{contains_case_insensitive, eq_case_insensitive};

pub mod sort;

pub use sort::{SortField, Sortable, sort_records};

/// A record that can be searched and faceted
pub trait Record {
    /// Values backing `facet`, or `None` when the record has no such field.
    /// An empty list is treated the same as a missing field.
    fn facet_values(&self, facet: Facet) -> Option<Vec<&str>>;

    /// Values the free-text search looks at for `field`
    fn search_values(&self, field: SearchField) -> Vec<&str>;
}

impl Record for Talent {
    fn facet_values(&self, facet: Facet) -> Option<Vec<&str>> {
        match facet {
            Facet::Skills => non_empty(self.skills.iter().map(String::as_str).collect()),
            Facet::Roles => self.role.as_deref().map(|r| vec![r]),
            Facet::Availability => self.availability.as_deref().map(|a| vec![a]),
            Facet::Cohort => self.cohort.as_deref().map(|c| vec![c]),
            Facet::ProjectTypes | Facet::TechStack | Facet::Category => None,
        }
    }

    fn search_values(&self, field: SearchField) -> Vec<&str> {
        match field {
            SearchField::Name => self.name.as_deref().into_iter().collect(),
            SearchField::Role => self.role.as_deref().into_iter().collect(),
            SearchField::Skills => self.skills.iter().map(String::as_str).collect(),
        }
    }
}

impl Record for Project {
    fn facet_values(&self, facet: Facet) -> Option<Vec<&str>> {
        match facet {
            Facet::ProjectTypes | Facet::Category => {
                self.project_type.as_deref().map(|t| vec![t])
            }
            Facet::TechStack => non_empty(self.tech_stack.iter().map(String::as_str).collect()),
            Facet::Skills | Facet::Roles | Facet::Availability | Facet::Cohort => None,
        }
    }

    /// Projects ignore the chosen field and always search title,
    /// description, tech stack and creators.
    fn search_values(&self, _field: SearchField) -> Vec<&str> {
        self.title
            .as_deref()
            .into_iter()
            .chain(self.description.as_deref())
            .chain(self.tech_stack.iter().map(String::as_str))
            .chain(self.created_by.iter().map(String::as_str))
            .collect()
    }
}

fn non_empty(values: Vec<&str>) -> Option<Vec<&str>> {
    (!values.is_empty()).then_some(values)
}

/// Trait for record filters
pub trait RecordFilter<R: Record>: Send + Sync {
    fn matches(&self, record: &R) -> bool;
}

/// Free-text search over the values a record exposes for one field
pub struct TextSearchFilter {
    needle: String,
    field: SearchField,
}

impl TextSearchFilter {
    pub fn new(needle: &str, field: SearchField) -> Self {
        Self {
            needle: needle.trim().to_string(),
            field,
        }
    }
}

impl<R: Record> RecordFilter<R> for TextSearchFilter {
    fn matches(&self, record: &R) -> bool {
        record
            .search_values(self.field)
            .iter()
            .any(|value| contains_case_insensitive(value, &self.needle))
    }
}

/// Multi-select facet: passes when any field value contains any selection
pub struct AnyOfFilter {
    facet: Facet,
    selected: Vec<String>,
}

impl AnyOfFilter {
    pub fn new<I, S>(facet: Facet, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facet,
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }
}

impl<R: Record> RecordFilter<R> for AnyOfFilter {
    fn matches(&self, record: &R) -> bool {
        let Some(values) = record.facet_values(self.facet) else {
            return false;
        };
        self.selected.iter().any(|wanted| {
            values
                .iter()
                .any(|value| contains_case_insensitive(value, wanted))
        })
    }
}

/// Single-select facet: passes when a field value equals the selection
pub struct ExactFilter {
    facet: Facet,
    value: String,
}

impl ExactFilter {
    pub fn new(facet: Facet, value: &str) -> Self {
        Self {
            facet,
            value: value.trim().to_string(),
        }
    }
}

impl<R: Record> RecordFilter<R> for ExactFilter {
    fn matches(&self, record: &R) -> bool {
        record.facet_values(self.facet).is_some_and(|values| {
            values
                .iter()
                .any(|value| eq_case_insensitive(value.trim(), &self.value))
        })
    }
}

/// A built query that can be applied to record collections
pub struct RecordQuery<R: Record> {
    filters: Vec<Box<dyn RecordFilter<R>>>,
    sort_by: SortField,
}

impl<R: Record> RecordQuery<R> {
    /// Build the query for the active parts of `criteria`
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        RecordQueryBuilder::from_criteria(criteria).build()
    }

    pub fn matches(&self, record: &R) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.filters.is_empty()
    }

    /// Keep matching records, then sort them
    pub fn apply(&self, records: Vec<R>) -> Vec<R>
    where
        R: sort::Sortable,
    {
        let mut filtered: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();
        sort_records(&mut filtered, self.sort_by);
        filtered
    }
}

/// Query builder for filtering and sorting records
pub struct RecordQueryBuilder<R: Record> {
    filters: Vec<Box<dyn RecordFilter<R>>>,
    sort_by: SortField,
}

impl<R: Record> RecordQueryBuilder<R> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_by: SortField::default(),
        }
    }

    /// Start from the criteria's active search and facets.
    /// Inactive parts (blank text, empty sets, unset singles) add nothing.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut builder = Self::new();

        if let Some(text) = criteria.search_query() {
            builder = builder.with_filter(Box::new(TextSearchFilter::new(
                text,
                criteria.search_field,
            )));
        }
        for (facet, values) in criteria.active_multi() {
            builder =
                builder.with_filter(Box::new(AnyOfFilter::new(facet, values.iter().cloned())));
        }
        for (facet, value) in criteria.active_single() {
            builder = builder.with_filter(Box::new(ExactFilter::new(facet, value)));
        }

        builder
    }

    /// Add a filter to the query (AND composition)
    pub fn with_filter(mut self, filter: Box<dyn RecordFilter<R>>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort_by: SortField) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn build(self) -> RecordQuery<R> {
        RecordQuery {
            filters: self.filters,
            sort_by: self.sort_by,
        }
    }
}

impl<R: Record> Default for RecordQueryBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `record` satisfies every active part of `criteria`
pub fn matches<R: Record>(record: &R, criteria: &FilterCriteria) -> bool {
    RecordQuery::from_criteria(criteria).matches(record)
}
