//! Side-panel draft of the filter criteria.
//!
//! The panel edits a private copy; nothing reaches the store until `apply`.
//! `clear_all` is the exception and commits defaults straight away.

use crate::error::Result;
use crate::types::{Facet, SearchField};

use super::{FilterCriteria, FilterStore};

/// What the panel should do after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSignal {
    Stay,
    Close,
}

/// Uncommitted copy of the criteria held by an open filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    draft: FilterCriteria,
}

impl FilterDraft {
    /// Open a panel seeded from the currently applied criteria
    pub fn open(store: &FilterStore) -> Self {
        Self {
            draft: store.criteria().clone(),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.draft
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> PanelSignal {
        self.draft.search_text = text.into();
        PanelSignal::Stay
    }

    pub fn set_search_field(&mut self, field: SearchField) -> PanelSignal {
        self.draft.search_field = field;
        PanelSignal::Stay
    }

    pub fn toggle_in_set(&mut self, facet: Facet, value: &str) -> Result<PanelSignal> {
        self.draft.toggle_in_set(facet, value)?;
        Ok(PanelSignal::Stay)
    }

    pub fn toggle_single(&mut self, facet: Facet, value: &str) -> Result<PanelSignal> {
        self.draft.toggle_single(facet, value)?;
        Ok(PanelSignal::Stay)
    }

    /// Commit the whole draft in one step and close the panel
    pub fn apply(self, store: &mut FilterStore) -> PanelSignal {
        store.commit(self.draft);
        PanelSignal::Close
    }

    /// Reset both the draft and the applied criteria, then close
    pub fn clear_all(&mut self, store: &mut FilterStore) -> PanelSignal {
        self.draft = FilterCriteria::default();
        store.clear_all();
        PanelSignal::Close
    }

    /// Close without committing anything
    pub fn discard(self) -> PanelSignal {
        PanelSignal::Close
    }
}
