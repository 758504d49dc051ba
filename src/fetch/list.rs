//! Debounced list fetch.
//!
//! Criteria changes arm the debouncer; when it fires, the catalog's request
//! is sent and the response is extracted, post-processed and published as a
//! new `ListSnapshot`. Every fetch takes a ticket from a counter, and a
//! result is only applied if its ticket is still the newest one, so
//! responses that resolve out of order never overwrite fresher data.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::catalog::{Catalog, Processed};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::remote::{RemoteClient, extract_collection};

use super::debounce::Debouncer;
use super::{FailureKind, ListSnapshot, ListStatus};

struct Shared<K: Catalog, C> {
    catalog: K,
    client: C,
    /// Ticket of the newest fetch issued
    latest: Mutex<u64>,
    state: watch::Sender<ListSnapshot<K::Item>>,
}

pub struct ListController<K: Catalog, C: RemoteClient + 'static> {
    shared: Arc<Shared<K, C>>,
    debouncer: Debouncer,
}

impl<K: Catalog, C: RemoteClient + 'static> ListController<K, C> {
    pub fn new(catalog: K, client: C, settle_delay: Duration) -> Self {
        let (state, _) = watch::channel(ListSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                catalog,
                client,
                latest: Mutex::new(0),
                state,
            }),
            debouncer: Debouncer::new(settle_delay),
        }
    }

    pub fn catalog(&self) -> &K {
        &self.shared.catalog
    }

    pub fn client(&self) -> &C {
        &self.shared.client
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<K::Item>> {
        self.shared.state.subscribe()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> ListSnapshot<K::Item> {
        self.shared.state.borrow().clone()
    }

    /// Schedule a fetch for `criteria` after the settle delay, replacing any
    /// fetch still waiting on the timer.
    pub fn criteria_changed(&self, criteria: FilterCriteria) {
        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(async move {
            shared.fetch(criteria).await;
        });
    }

    /// Fetch right away, dropping any pending debounced fetch.
    /// Resolves once the result (or failure) has been published.
    pub async fn refresh(&self, criteria: FilterCriteria) {
        self.debouncer.cancel();
        Arc::clone(&self.shared).fetch(criteria).await;
    }

    /// Whether a debounced fetch is still waiting on its timer
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn cancel_pending(&self) -> bool {
        self.debouncer.cancel()
    }
}

impl<K: Catalog, C: RemoteClient + 'static> Shared<K, C> {
    fn issue_ticket(&self) -> u64 {
        let mut latest = self.latest.lock();
        *latest += 1;
        self.state.send_modify(|snapshot| snapshot.loading = true);
        *latest
    }

    async fn load(&self, criteria: &FilterCriteria) -> Result<Processed<K::Item>> {
        let request = self.catalog.request(criteria);
        let body = self.client.get_json(&request).await?;
        let items = extract_collection(body, self.catalog.collection_key())?;
        Ok(self.catalog.post_process(items, criteria))
    }

    async fn fetch(self: Arc<Self>, criteria: FilterCriteria) {
        let ticket = self.issue_ticket();
        let kind = self.catalog.kind();
        tracing::debug!("fetching {} (ticket {ticket})", kind.plural());

        let outcome = self.load(&criteria).await;

        let latest = self.latest.lock();
        if *latest != ticket {
            tracing::debug!(
                "dropping stale {} result (ticket {ticket}, latest {})",
                kind.plural(),
                *latest
            );
            return;
        }

        self.state.send_modify(|snapshot| {
            match outcome {
                Ok(processed) if processed.items.is_empty() => {
                    snapshot.message = Some(self.catalog.empty_message(processed.hidden));
                    snapshot.items = Arc::new(Vec::new());
                    snapshot.status = ListStatus::Empty;
                }
                Ok(processed) => {
                    snapshot.message = None;
                    snapshot.items = Arc::new(processed.items);
                    snapshot.status = ListStatus::Loaded;
                }
                Err(e) => {
                    let failure = FailureKind::classify(&e);
                    tracing::warn!("Failed to fetch {}: {e}", kind.plural());
                    snapshot.message = Some(failure.message(kind));
                    snapshot.items = Arc::new(Vec::new());
                    snapshot.status = ListStatus::Failed { kind: failure };
                }
            }
            snapshot.criteria = criteria;
            snapshot.loading = false;
            snapshot.generation += 1;
        });
    }
}
