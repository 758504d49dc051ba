//! Browse model types for testable state management
//!
//! This module separates state (BrowseState) from view (BrowseViewModel) so
//! the whole browse page can be unit tested without a renderer or network.

use std::sync::Arc;

use crate::fetch::{DetailSnapshot, DetailStatus, ListSnapshot, ListStatus};
use crate::filter::{FilterChip, FilterDraft, FilterPatch, FilterStore, FilterUpdate};
use crate::paging::Pager;
use crate::types::{Facet, FacetKind, SearchField, TalentProfile};

/// Raw state that changes during user interaction
#[derive(Debug, Clone)]
pub struct BrowseState<T> {
    /// Applied filter criteria
    pub filters: FilterStore,
    /// Open side panel, if any
    pub panel: Option<FilterDraft>,
    /// Records from the latest applied fetch, already filtered and sorted
    pub items: Arc<Vec<T>>,
    pub status: ListStatus,
    /// Whether a list fetch is in flight
    pub loading: bool,
    /// Inline message for empty and failed listings
    pub message: Option<String>,
    /// Generation of the list snapshot last taken in
    pub generation: u64,
    pub pager: Pager,
    pub detail: DetailSnapshot,
    /// Set by actions that should bring the viewport back to the top
    pub scroll_to_top: bool,
    /// Short-lived notice for rejected input
    pub notice: Option<String>,
}

impl<T> BrowseState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: FilterStore::default(),
            panel: None,
            items: Arc::new(Vec::new()),
            status: ListStatus::Idle,
            loading: false,
            message: None,
            generation: 0,
            pager: Pager::new(page_size),
            detail: DetailSnapshot::default(),
            scroll_to_top: false,
            notice: None,
        }
    }
}

/// All possible actions on the browse page
#[derive(Debug, Clone)]
pub enum BrowseAction<T> {
    // Search bar
    /// Replace the search text
    UpdateSearch(String),
    /// Choose which field the search runs against
    SetSearchField(SearchField),

    // Facets and chips
    /// Toggle a facet value directly on the applied criteria
    ToggleFacet { facet: Facet, value: String },
    /// Remove one active filter chip
    RemoveChip(FilterChip),
    /// Reset every filter to defaults
    ClearAll,

    // Side panel
    OpenPanel,
    PanelToggle { facet: Facet, value: String },
    PanelSearch(String),
    PanelSearchField(SearchField),
    /// Commit the panel draft and close
    ApplyPanel,
    /// Reset filters from inside the panel and close
    ClearPanel,
    /// Close the panel without committing
    ClosePanel,

    // Pagination
    NextPage,
    PreviousPage,
    GoToPage(usize),

    // Fetch results
    /// New list snapshot published by the list controller
    ListUpdated(ListSnapshot<T>),
    /// New detail snapshot published by the detail controller
    DetailUpdated(DetailSnapshot),

    // Selection
    Select(String),
    ClearSelection,
}

/// Computed view model for rendering the whole page
#[derive(Debug, Clone)]
pub struct BrowseViewModel<T> {
    /// Records on the current page
    pub items: Vec<T>,
    pub search_text: String,
    pub search_field: SearchField,
    pub chips: Vec<FilterChip>,
    pub panel_open: bool,
    pub loading: bool,
    /// Inline empty or failure message
    pub message: Option<String>,
    /// Offer a retry next to the message
    pub can_retry: bool,
    pub pagination: PaginationViewModel,
    pub detail: DetailViewModel,
    pub scroll_to_top: bool,
    pub notice: Option<String>,
}

/// View model for the pagination control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationViewModel {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_numbers: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
    /// Hidden when everything fits on one page
    pub visible: bool,
}

/// View model for the detail modal
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    pub open: bool,
    pub loading: bool,
    pub profile: Option<TalentProfile>,
    /// Selection settled without a profile
    pub failed: bool,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// Pure function: compute view model from state
pub fn compute_view_model<T: Clone>(state: &BrowseState<T>) -> BrowseViewModel<T> {
    let criteria = state.filters.criteria();
    let pager = &state.pager;

    let pagination = PaginationViewModel {
        current_page: pager.current_page(),
        total_pages: pager.total_pages(),
        total_items: pager.total_items(),
        page_numbers: pager.page_numbers().collect(),
        has_previous: pager.has_previous(),
        has_next: pager.has_next(),
        visible: pager.total_pages() > 1,
    };

    let detail = DetailViewModel {
        open: state.detail.selected.is_some(),
        loading: state.detail.loading,
        profile: state.detail.profile.clone(),
        failed: matches!(state.detail.status, DetailStatus::Failed(_)),
    };

    BrowseViewModel {
        items: pager.slice(&state.items).to_vec(),
        search_text: criteria.search_text.clone(),
        search_field: criteria.search_field,
        chips: criteria.chips(),
        panel_open: state.panel.is_some(),
        loading: state.loading,
        message: if state.loading {
            None
        } else {
            state.message.clone()
        },
        can_retry: !state.loading && matches!(state.status, ListStatus::Failed { .. }),
        pagination,
        detail,
        scroll_to_top: state.scroll_to_top,
        notice: state.notice.clone(),
    }
}

/// Pure function: apply action to state (reducer pattern)
///
/// Only synchronous state transitions happen here. Fetching is driven by the
/// caller, which compares `filters.revision()` before and after.
pub fn reduce_browse_state<T>(
    mut state: BrowseState<T>,
    action: BrowseAction<T>,
) -> BrowseState<T> {
    let revision = state.filters.revision();
    if !matches!(
        action,
        BrowseAction::ListUpdated(_) | BrowseAction::DetailUpdated(_)
    ) {
        state.scroll_to_top = false;
        state.notice = None;
    }

    match action {
        // Search bar
        BrowseAction::UpdateSearch(text) => {
            commit(&mut state, FilterUpdate::Patch(FilterPatch::search_text(text)));
        }
        BrowseAction::SetSearchField(field) => {
            commit(&mut state, FilterUpdate::Patch(FilterPatch::search_field(field)));
        }

        // Facets and chips
        BrowseAction::ToggleFacet { facet, value } => {
            let result = match facet.kind() {
                FacetKind::Multi => state.filters.toggle_in_set(facet, &value),
                FacetKind::Single => state.filters.toggle_single(facet, &value),
            };
            if let Err(e) = result {
                state.notice = Some(e.to_string());
            }
        }
        BrowseAction::RemoveChip(chip) => {
            state.filters.remove_chip(&chip);
        }
        BrowseAction::ClearAll => {
            state.filters.clear_all();
        }

        // Side panel
        BrowseAction::OpenPanel => {
            state.panel = Some(FilterDraft::open(&state.filters));
        }
        BrowseAction::PanelToggle { facet, value } => {
            if let Some(panel) = state.panel.as_mut() {
                let result = match facet.kind() {
                    FacetKind::Multi => panel.toggle_in_set(facet, &value),
                    FacetKind::Single => panel.toggle_single(facet, &value),
                };
                if let Err(e) = result {
                    state.notice = Some(e.to_string());
                }
            }
        }
        BrowseAction::PanelSearch(text) => {
            if let Some(panel) = state.panel.as_mut() {
                panel.set_search_text(text);
            }
        }
        BrowseAction::PanelSearchField(field) => {
            if let Some(panel) = state.panel.as_mut() {
                panel.set_search_field(field);
            }
        }
        BrowseAction::ApplyPanel => {
            if let Some(panel) = state.panel.take() {
                panel.apply(&mut state.filters);
            }
        }
        BrowseAction::ClearPanel => {
            if let Some(mut panel) = state.panel.take() {
                panel.clear_all(&mut state.filters);
            }
        }
        BrowseAction::ClosePanel => {
            if let Some(panel) = state.panel.take() {
                panel.discard();
            }
        }

        // Pagination
        BrowseAction::NextPage => {
            state.scroll_to_top = state.pager.next();
        }
        BrowseAction::PreviousPage => {
            state.scroll_to_top = state.pager.previous();
        }
        BrowseAction::GoToPage(page) => {
            state.scroll_to_top = state.pager.go_to(page);
        }

        // Fetch results
        BrowseAction::ListUpdated(snapshot) => {
            state.loading = snapshot.loading;
            if snapshot.generation != state.generation {
                state.generation = snapshot.generation;
                state.pager.set_total(snapshot.items.len());
                state.items = snapshot.items;
                state.status = snapshot.status;
                state.message = snapshot.message;
            }
        }
        BrowseAction::DetailUpdated(snapshot) => {
            state.detail = snapshot;
        }

        // Selection
        BrowseAction::Select(id) => {
            state.detail = DetailSnapshot {
                selected: Some(id),
                profile: None,
                loading: true,
                status: DetailStatus::Loading,
            };
        }
        BrowseAction::ClearSelection => {
            state.detail = DetailSnapshot::default();
        }
    }

    // Any change to the applied criteria starts over from page 1
    if state.filters.revision() != revision {
        state.pager.reset();
        state.scroll_to_top = true;
    }
    state
}

fn commit<T>(state: &mut BrowseState<T>, update: FilterUpdate) {
    if let Err(e) = state.filters.update(update) {
        state.notice = Some(e.to_string());
    }
}
