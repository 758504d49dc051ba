//! Filter state: the criteria a listing is narrowed by, and the store that
//! owns the applied copy.
//!
//! Criteria are a free-text query plus two families of facets. Multi-select
//! facets hold a set of values; single-select facets hold at most one, and
//! toggling the active value clears it. Empty sets are never stored, so a
//! cleared criteria value compares equal to `FilterCriteria::default()`.

pub mod draft;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};
use crate::types::{Facet, FacetKind, SearchField};

pub use draft::{FilterDraft, PanelSignal};

/// Current filter criteria for one listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Raw search text as typed; matching trims it
    #[serde(default)]
    pub search_text: String,
    /// Field the free-text search targets (talents only)
    #[serde(default)]
    pub search_field: SearchField,
    #[serde(default)]
    multi_select: BTreeMap<Facet, BTreeSet<String>>,
    #[serde(default)]
    single_select: BTreeMap<Facet, String>,
}

/// One removable active filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub facet: Facet,
    pub value: String,
}

impl FilterChip {
    pub fn label(&self) -> String {
        format!("{}: {}", self.facet.label(), self.value)
    }
}

fn expect_kind(facet: Facet, expected: FacetKind) -> Result<()> {
    if facet.kind() == expected {
        Ok(())
    } else {
        Err(DirectoryError::FacetKind {
            facet,
            expected: expected.as_str(),
            actual: facet.kind().as_str(),
        })
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text and field (builder style)
    pub fn with_search(mut self, text: impl Into<String>, field: SearchField) -> Self {
        self.search_text = text.into();
        self.search_field = field;
        self
    }

    /// Add values to a multi-select facet (builder style)
    pub fn with_values<I, S>(mut self, facet: Facet, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        expect_kind(facet, FacetKind::Multi)?;
        for value in values {
            let value = value.into();
            if !value.trim().is_empty() {
                self.multi_select.entry(facet).or_default().insert(value);
            }
        }
        Ok(self)
    }

    /// Select a single-select facet value (builder style)
    pub fn with_single(mut self, facet: Facet, value: impl Into<String>) -> Result<Self> {
        self.set_single(facet, Some(value.into()))?;
        Ok(self)
    }

    /// Trimmed search text, or `None` when the search is inactive
    pub fn search_query(&self) -> Option<&str> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Selected values of a multi-select facet, in sorted order
    pub fn selected(&self, facet: Facet) -> impl Iterator<Item = &str> {
        self.multi_select
            .get(&facet)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        match facet.kind() {
            FacetKind::Multi => self
                .multi_select
                .get(&facet)
                .is_some_and(|set| set.contains(value)),
            FacetKind::Single => self.single(facet) == Some(value),
        }
    }

    /// Active value of a single-select facet
    pub fn single(&self, facet: Facet) -> Option<&str> {
        self.single_select.get(&facet).map(String::as_str)
    }

    /// Multi-select facets with at least one value, with their values
    pub fn active_multi(&self) -> impl Iterator<Item = (Facet, &BTreeSet<String>)> {
        self.multi_select
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(facet, set)| (*facet, set))
    }

    /// Single-select facets with a value
    pub fn active_single(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.single_select
            .iter()
            .map(|(facet, value)| (*facet, value.as_str()))
    }

    /// True when no facet and no search text constrains the listing
    pub fn is_empty(&self) -> bool {
        self.search_query().is_none()
            && self.active_multi().next().is_none()
            && self.single_select.is_empty()
    }

    /// Remove `value` from the facet's set if present, add it otherwise
    pub fn toggle_in_set(&mut self, facet: Facet, value: &str) -> Result<()> {
        expect_kind(facet, FacetKind::Multi)?;
        if value.trim().is_empty() {
            return Ok(());
        }
        let set = self.multi_select.entry(facet).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            self.multi_select.remove(&facet);
        }
        Ok(())
    }

    /// Clear the facet if `value` is already active, select it otherwise
    pub fn toggle_single(&mut self, facet: Facet, value: &str) -> Result<()> {
        expect_kind(facet, FacetKind::Single)?;
        if value.trim().is_empty() {
            return Ok(());
        }
        if self.single(facet) == Some(value) {
            self.single_select.remove(&facet);
        } else {
            self.single_select.insert(facet, value.to_string());
        }
        Ok(())
    }

    /// Set or clear a single-select facet outright
    pub fn set_single(&mut self, facet: Facet, value: Option<String>) -> Result<()> {
        expect_kind(facet, FacetKind::Single)?;
        match value {
            Some(v) if !v.trim().is_empty() => {
                self.single_select.insert(facet, v);
            }
            _ => {
                self.single_select.remove(&facet);
            }
        }
        Ok(())
    }

    /// Replace a multi-select facet's whole set
    pub fn set_values(&mut self, facet: Facet, mut values: BTreeSet<String>) -> Result<()> {
        expect_kind(facet, FacetKind::Multi)?;
        values.retain(|v| !v.trim().is_empty());
        if values.is_empty() {
            self.multi_select.remove(&facet);
        } else {
            self.multi_select.insert(facet, values);
        }
        Ok(())
    }

    /// Every active facet value as a removable chip, in facet order
    pub fn chips(&self) -> Vec<FilterChip> {
        Facet::ALL
            .iter()
            .flat_map(|&facet| match facet.kind() {
                FacetKind::Multi => self
                    .selected(facet)
                    .map(|value| FilterChip {
                        facet,
                        value: value.to_string(),
                    })
                    .collect::<Vec<_>>(),
                FacetKind::Single => self
                    .single(facet)
                    .map(|value| FilterChip {
                        facet,
                        value: value.to_string(),
                    })
                    .into_iter()
                    .collect(),
            })
            .collect()
    }

    /// Drop one chip's value. Returns whether anything changed.
    pub fn remove_chip(&mut self, chip: &FilterChip) -> bool {
        match chip.facet.kind() {
            FacetKind::Multi => {
                let Some(set) = self.multi_select.get_mut(&chip.facet) else {
                    return false;
                };
                let removed = set.remove(&chip.value);
                if set.is_empty() {
                    self.multi_select.remove(&chip.facet);
                }
                removed
            }
            FacetKind::Single => {
                if self.single(chip.facet) == Some(chip.value.as_str()) {
                    self.single_select.remove(&chip.facet);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Apply a partial update; keys absent from the patch are left alone
    pub fn apply_patch(&mut self, patch: FilterPatch) -> Result<()> {
        if let Some(text) = patch.search_text {
            self.search_text = text;
        }
        if let Some(field) = patch.search_field {
            self.search_field = field;
        }
        for (facet, values) in patch.multi_select {
            self.set_values(facet, values)?;
        }
        for (facet, value) in patch.single_select {
            self.set_single(facet, value)?;
        }
        Ok(())
    }
}

/// Partial criteria update; only the carried keys are overwritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search_text: Option<String>,
    pub search_field: Option<SearchField>,
    /// Whole-set replacement per facet
    pub multi_select: BTreeMap<Facet, BTreeSet<String>>,
    /// `None` clears the facet
    pub single_select: BTreeMap<Facet, Option<String>>,
}

impl FilterPatch {
    pub fn search_text(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn search_field(field: SearchField) -> Self {
        Self {
            search_field: Some(field),
            ..Default::default()
        }
    }
}

/// Update accepted by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Replace(FilterCriteria),
    Patch(FilterPatch),
}

/// Owner of the applied criteria.
///
/// Every mutation that actually changes the criteria bumps `revision`, which
/// is what listings key their page reset and refetch off.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    criteria: FilterCriteria,
    revision: u64,
}

impl FilterStore {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            revision: 0,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Run a mutation against a scratch copy and commit it if it changed
    fn commit_with<F>(&mut self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut FilterCriteria) -> Result<()>,
    {
        let mut next = self.criteria.clone();
        mutate(&mut next)?;
        Ok(self.commit(next))
    }

    fn commit(&mut self, next: FilterCriteria) -> bool {
        if next == self.criteria {
            return false;
        }
        self.criteria = next;
        self.revision += 1;
        true
    }

    /// Replace or patch the criteria. Returns whether anything changed.
    pub fn update(&mut self, update: FilterUpdate) -> Result<bool> {
        match update {
            FilterUpdate::Replace(criteria) => Ok(self.commit(criteria)),
            FilterUpdate::Patch(patch) => self.commit_with(|c| c.apply_patch(patch)),
        }
    }

    pub fn toggle_in_set(&mut self, facet: Facet, value: &str) -> Result<bool> {
        self.commit_with(|c| c.toggle_in_set(facet, value))
    }

    pub fn toggle_single(&mut self, facet: Facet, value: &str) -> Result<bool> {
        self.commit_with(|c| c.toggle_single(facet, value))
    }

    pub fn remove_chip(&mut self, chip: &FilterChip) -> bool {
        let mut next = self.criteria.clone();
        next.remove_chip(chip);
        self.commit(next)
    }

    /// Reset every facet and the search to defaults
    pub fn clear_all(&mut self) -> bool {
        self.commit(FilterCriteria::default())
    }
}
