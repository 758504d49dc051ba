//! On-demand fetch of a single talent profile.
//!
//! Selecting an id fetches `/talent/{id}`. Selection, profile and loading
//! flag change together under one lock, and a result is only applied if the
//! selection it was fetched for is still current.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::{DirectoryError, Result};
use crate::remote::{ListRequest, RemoteClient, extract_object};
use crate::types::TalentProfile;

use super::FailureKind;

/// Response key the profile sits under
const PROFILE_KEY: &str = "portfolio";

/// Fields that mark a bare top-level body as a profile
const PROFILE_IDENTITY: &[&str] = &["id", "_id", "name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FailureKind),
}

/// Observable state of the detail view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSnapshot {
    pub selected: Option<String>,
    pub profile: Option<TalentProfile>,
    pub loading: bool,
    pub status: DetailStatus,
}

struct Selection {
    /// Bumped by every select and clear
    ticket: u64,
    id: Option<String>,
}

struct Shared<C> {
    client: C,
    selection: Mutex<Selection>,
    state: watch::Sender<DetailSnapshot>,
}

pub struct DetailController<C: RemoteClient + 'static> {
    shared: Arc<Shared<C>>,
}

impl<C: RemoteClient + 'static> Clone for DetailController<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Path for one profile. Ids are opaque tokens and must stay a single path
/// segment.
pub fn profile_request(id: &str) -> Result<ListRequest> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(DirectoryError::InvalidInput(format!(
            "invalid talent id '{id}'"
        )));
    }
    Ok(ListRequest::new(format!("/talent/{id}")))
}

impl<C: RemoteClient + 'static> DetailController<C> {
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(DetailSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                client,
                selection: Mutex::new(Selection { ticket: 0, id: None }),
                state,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Select `id` and fetch its profile; resolves once the outcome is
    /// published or discarded.
    pub async fn select(&self, id: impl Into<String>) {
        let id = id.into();
        let ticket = self.shared.begin(&id);
        self.shared.finish(id, ticket).await;
    }

    /// Select `id` now and fetch its profile in the background
    pub fn spawn_select(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let ticket = self.shared.begin(&id);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.finish(id, ticket).await })
    }

    /// Drop the selection together with its profile and loading flag
    pub fn clear(&self) {
        let mut selection = self.shared.selection.lock();
        selection.ticket += 1;
        selection.id = None;
        self.shared.state.send_replace(DetailSnapshot::default());
    }
}

impl<C: RemoteClient + 'static> Shared<C> {
    /// Mark `id` as selected and loading; returns the selection ticket
    fn begin(&self, id: &str) -> u64 {
        let mut selection = self.selection.lock();
        selection.ticket += 1;
        selection.id = Some(id.to_string());
        self.state.send_replace(DetailSnapshot {
            selected: Some(id.to_string()),
            profile: None,
            loading: true,
            status: DetailStatus::Loading,
        });
        selection.ticket
    }

    async fn finish(&self, id: String, ticket: u64) {
        let outcome = self.load(&id).await;

        let selection = self.selection.lock();
        if selection.ticket != ticket {
            tracing::debug!("dropping profile for '{id}': selection changed");
            return;
        }

        let (profile, status) = match outcome {
            Ok(profile) => (Some(profile), DetailStatus::Loaded),
            Err(e) => {
                tracing::warn!("Failed to fetch talent profile '{id}': {e}");
                (None, DetailStatus::Failed(FailureKind::classify(&e)))
            }
        };
        self.state.send_replace(DetailSnapshot {
            selected: selection.id.clone(),
            profile,
            loading: false,
            status,
        });
    }

    async fn load(&self, id: &str) -> Result<TalentProfile> {
        let request = profile_request(id)?;
        let body = self.client.get_json(&request).await?;
        extract_object(body, PROFILE_KEY, PROFILE_IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_request_path() {
        let request = profile_request(" 65a1f0c2e4b0 ").unwrap();
        assert_eq!(request.path, "/talent/65a1f0c2e4b0");
        assert!(!request.has_params());
    }

    #[test]
    fn test_profile_request_rejects_path_tricks() {
        for id in ["", "   ", "../admin", "a/b", "a?b=c"] {
            assert!(
                matches!(profile_request(id), Err(DirectoryError::InvalidInput(_))),
                "expected '{id}' to be rejected"
            );
        }
    }
}
