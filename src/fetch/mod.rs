//! Fetch controllers: the debounced list fetch and the on-demand detail
//! fetch, plus the outcome types their snapshots carry.

pub mod debounce;
pub mod detail;
pub mod list;

use std::sync::Arc;

use serde::Serialize;

use crate::error::DirectoryError;
use crate::filter::FilterCriteria;
use crate::types::EntityKind;

pub use debounce::{DEFAULT_SETTLE_DELAY_MS, Debouncer};
pub use detail::{DetailController, DetailSnapshot, DetailStatus};
pub use list::ListController;

/// Why a fetch failed, as far as the user needs to know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Transport-level failure: no usable response arrived
    Network,
    /// The server answered with a non-success status
    Server,
    /// The response body did not have the expected shape
    Malformed,
    /// The request was rejected before it was sent
    Invalid,
}

impl FailureKind {
    pub fn classify(error: &DirectoryError) -> Self {
        match error {
            DirectoryError::Http(e) if e.is_decode() => FailureKind::Malformed,
            DirectoryError::Status { .. } => FailureKind::Server,
            DirectoryError::MalformedResponse(_) | DirectoryError::Json(_) => {
                FailureKind::Malformed
            }
            DirectoryError::InvalidInput(_) => FailureKind::Invalid,
            _ => FailureKind::Network,
        }
    }

    /// Inline message shown in place of the listing
    pub fn message(self, kind: EntityKind) -> String {
        let hint = match self {
            FailureKind::Network => "Check your connection and try again.",
            FailureKind::Server => "The directory is unavailable right now. Please try again.",
            FailureKind::Malformed => {
                "The directory sent an unexpected response. Please try again."
            }
            FailureKind::Invalid => "The request was not valid. Check the values you entered.",
        };
        format!("Failed to load {}. {hint}", kind.plural())
    }
}

/// Outcome of the latest list fetch
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ListStatus {
    /// Nothing fetched yet
    #[default]
    Idle,
    Loaded,
    /// The fetch succeeded but nothing is left to show
    Empty,
    Failed { kind: FailureKind },
}

/// Observable state of a list controller
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    /// Filtered and sorted records from the latest applied fetch
    pub items: Arc<Vec<T>>,
    pub status: ListStatus,
    /// True while a fetch is in flight
    pub loading: bool,
    /// Inline message for the empty and failed states
    pub message: Option<String>,
    /// Criteria the current items were fetched for
    pub criteria: FilterCriteria,
    /// Bumped every time a fetch result is applied
    pub generation: u64,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            status: ListStatus::Idle,
            loading: false,
            message: None,
            criteria: FilterCriteria::default(),
            generation: 0,
        }
    }
}

impl<T> ListSnapshot<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ListStatus::Failed { .. })
    }
}
