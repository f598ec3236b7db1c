//! Debounced search-box lookups.
//!
//! Raw input changes go in, settled queries come out after the input has
//! been quiet for the debounce window, and each settled query is looked up
//! against the server. A response is only published if no newer query has
//! been issued since its request went out.

use std::sync::Arc;
use std::time::Duration;

use storefront_core::{is_searchable, Product};
use tokio::sync::mpsc;

use crate::client::CatalogClient;
use crate::error::ClientError;

const CHANNEL_CAPACITY: usize = 32;

/// Handle for one issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets and remembers which one is newest.
#[derive(Debug, Default)]
pub struct QueryTracker {
    latest: u64,
}

impl QueryTracker {
    /// Issues a ticket that supersedes every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Supersedes all outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Emits a value once `input` has been quiet for `window`.
///
/// Every new value restarts the window, so a burst collapses into its last
/// value. A value still pending when `input` closes is flushed immediately.
#[must_use]
pub fn debounce(mut input: mpsc::Receiver<String>, window: Duration) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut pending: Option<String> = None;
        loop {
            let Some(value) = pending.take() else {
                match input.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            };

            tokio::select! {
                next = input.recv() => {
                    if let Some(next) = next {
                        pending = Some(next);
                    } else {
                        let _ = tx.send(value).await;
                        break;
                    }
                }
                () = tokio::time::sleep(window) => {
                    if tx.send(value).await.is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Outcome of a settled search-box query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// Lookup results for `query`, which is the trimmed input.
    Results {
        query: String,
        products: Vec<Product>,
    },
    /// The input became blank; no lookup was made.
    Cleared,
}

type Completion = (Ticket, String, Result<Vec<Product>, ClientError>);

/// Debounced, last-query-wins search against the catalog API.
///
/// Failed lookups are logged and produce no event, leaving whatever the
/// consumer last showed in place.
pub struct DiscoverySearch {
    client: Arc<CatalogClient>,
    window: Duration,
}

impl DiscoverySearch {
    #[must_use]
    pub fn new(client: Arc<CatalogClient>, window: Duration) -> Self {
        Self { client, window }
    }

    /// Starts consuming raw input values. The returned channel closes once
    /// `inputs` is closed and every outstanding lookup has finished.
    #[must_use]
    pub fn spawn(self, inputs: mpsc::Receiver<String>) -> mpsc::Receiver<DiscoveryEvent> {
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(self.run(inputs, events_tx));
        events_rx
    }

    async fn run(self, inputs: mpsc::Receiver<String>, events: mpsc::Sender<DiscoveryEvent>) {
        let mut settled = debounce(inputs, self.window);
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut tracker = QueryTracker::default();
        let mut in_flight = 0usize;
        let mut inputs_open = true;

        while inputs_open || in_flight > 0 {
            tokio::select! {
                query = settled.recv(), if inputs_open => {
                    let Some(query) = query else {
                        inputs_open = false;
                        continue;
                    };
                    if !is_searchable(&query) {
                        tracker.invalidate();
                        if events.send(DiscoveryEvent::Cleared).await.is_err() {
                            return;
                        }
                        continue;
                    }

                    let ticket = tracker.issue();
                    in_flight += 1;
                    tracing::debug!(query = %query, "issuing discovery lookup");
                    let client = Arc::clone(&self.client);
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let result = client.search(&query).await;
                        let _ = done_tx.send((ticket, query, result));
                    });
                }
                Some((ticket, query, result)) = done_rx.recv() => {
                    in_flight -= 1;
                    if !tracker.is_current(ticket) {
                        tracing::debug!(query = %query, "dropping stale discovery response");
                        continue;
                    }
                    match result {
                        Ok(products) => {
                            let event = DiscoveryEvent::Results {
                                query: query.trim().to_string(),
                                products,
                            };
                            if events.send(event).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, query = %query, "discovery lookup failed");
                        }
                    }
                }
            }
        }
    }
}
