//! Browse page driver.
//!
//! `Browser` owns the pure `BrowseState` and the two fetch controllers. Each
//! dispatched action goes through the reducer; when the applied criteria
//! changed, the list controller is asked for a debounced refetch, and
//! selection changes are forwarded to the detail controller.

pub mod model;

use std::time::Duration;

use crate::catalog::Catalog;
use crate::fetch::{DetailController, ListController};
use crate::filter::FilterCriteria;
use crate::remote::RemoteClient;

pub use model::{
    BrowseAction, BrowseState, BrowseViewModel, DetailViewModel, PaginationViewModel,
    compute_view_model, reduce_browse_state,
};

pub struct Browser<K: Catalog, C: RemoteClient + Clone + 'static> {
    state: BrowseState<K::Item>,
    list: ListController<K, C>,
    detail: DetailController<C>,
}

impl<K: Catalog, C: RemoteClient + Clone + 'static> Browser<K, C> {
    pub fn new(catalog: K, client: C, settle_delay: Duration) -> Self {
        let state = BrowseState::new(catalog.page_size());
        Self {
            state,
            detail: DetailController::new(client.clone()),
            list: ListController::new(catalog, client, settle_delay),
        }
    }

    /// Start from `criteria` instead of the defaults
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.state.filters = crate::filter::FilterStore::new(criteria);
        self
    }

    pub fn state(&self) -> &BrowseState<K::Item> {
        &self.state
    }

    pub fn list(&self) -> &ListController<K, C> {
        &self.list
    }

    pub fn detail(&self) -> &DetailController<C> {
        &self.detail
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.state.filters.criteria()
    }

    /// Schedule the initial fetch for the current criteria
    pub fn start(&self) {
        self.list.criteria_changed(self.criteria().clone());
    }

    /// Fetch immediately (the retry affordance) and take in the result
    pub async fn refresh(&mut self) {
        self.list.refresh(self.criteria().clone()).await;
        self.sync();
    }

    pub fn dispatch(&mut self, action: BrowseAction<K::Item>) {
        let revision = self.state.filters.revision();
        let selection = match &action {
            BrowseAction::Select(id) => Some(Some(id.clone())),
            BrowseAction::ClearSelection => Some(None),
            _ => None,
        };

        self.reduce(action);

        if self.state.filters.revision() != revision {
            self.list.criteria_changed(self.criteria().clone());
        }
        match selection {
            Some(Some(id)) => {
                self.detail.spawn_select(id);
            }
            Some(None) => self.detail.clear(),
            None => {}
        }
    }

    /// Take in the latest snapshots from both controllers
    pub fn sync(&mut self) {
        let list = self.list.snapshot();
        self.reduce(BrowseAction::ListUpdated(list));
        let detail = self.detail.snapshot();
        if detail != self.state.detail {
            self.reduce(BrowseAction::DetailUpdated(detail));
        }
    }

    pub fn view_model(&self) -> BrowseViewModel<K::Item> {
        compute_view_model(&self.state)
    }

    fn reduce(&mut self, action: BrowseAction<K::Item>) {
        let page_size = self.state.pager.page_size();
        let state = std::mem::replace(&mut self.state, BrowseState::new(page_size));
        self.state = reduce_browse_state(state, action);
    }
}
