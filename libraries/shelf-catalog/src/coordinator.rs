//! Single-flight lookup coordination.
//!
//! At most one in-progress catalog request per distinct barcode: concurrent
//! duplicates issue no second request and receive the outcome of the flight
//! already in the air.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::types::CatalogConfig;
use async_trait::async_trait;
use shelf_core::{Barcode, LookupOutcome, ProductLookup};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, warn};

type FlightMap = HashMap<String, broadcast::Sender<LookupOutcome>>;

/// Coordinates catalog lookups on behalf of the scan pipeline.
///
/// Wraps a [`CatalogClient`] and folds every failure mode into
/// [`LookupOutcome::Failed`] - a lookup error never propagates as an `Err`
/// to the state machine, it only populates the outcome.
pub struct LookupCoordinator {
    client: CatalogClient,
    // Guarded by a sync mutex: the lock is never held across an await, and
    // FlightGuard must be able to take it from a Drop impl.
    in_flight: Mutex<FlightMap>,
}

/// Retires one in-flight map entry when the leading lookup finishes.
///
/// Arms on creation; dropping it removes the entry and publishes the outcome
/// (if one was recorded) to every joiner. Because this runs from `Drop`, a
/// leading future that is cancelled mid-request still clears its slot: the
/// sender is dropped, waiting joiners observe a closed channel, and the next
/// lookup for the same code starts a fresh flight instead of subscribing to
/// one that can never publish.
struct FlightGuard<'a> {
    in_flight: &'a Mutex<FlightMap>,
    key: &'a str,
    outcome: Option<LookupOutcome>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock_flights(self.in_flight);
        if let Some(tx) = in_flight.remove(self.key) {
            if let Some(outcome) = self.outcome.take() {
                let _ = tx.send(outcome);
            }
        }
    }
}

fn lock_flights(in_flight: &Mutex<FlightMap>) -> MutexGuard<'_, FlightMap> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LookupCoordinator {
    /// Create a coordinator over its own catalog client.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        Ok(Self {
            client: CatalogClient::new(config)?,
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    /// Look one barcode up, single-flighted per distinct code.
    pub async fn lookup(&self, code: &Barcode) -> LookupOutcome {
        // Join an existing flight for this code if there is one
        let mut rx = {
            let mut in_flight = lock_flights(&self.in_flight);
            match in_flight.get(code.as_str()) {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    in_flight.insert(code.as_str().to_string(), tx);
                    None
                }
            }
        };

        if let Some(rx) = rx.as_mut() {
            debug!(code = %code, "joining in-flight lookup");
            return match rx.recv().await {
                Ok(outcome) => outcome,
                Err(_) => LookupOutcome::Failed {
                    reason: "in-flight lookup abandoned before completing".to_string(),
                },
            };
        }

        // Leading flight: the guard retires the map entry on every exit
        // path, including cancellation of this future.
        let mut guard = FlightGuard {
            in_flight: &self.in_flight,
            key: code.as_str(),
            outcome: None,
        };
        let outcome = self.query(code).await;
        guard.outcome = Some(outcome.clone());
        outcome
    }

    async fn query(&self, code: &Barcode) -> LookupOutcome {
        match self.client.fetch_product(code).await {
            Ok(response) => response.into_outcome(),
            Err(err) => {
                warn!(code = %code, error = %err, "catalog lookup failed");
                LookupOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl ProductLookup for LookupCoordinator {
    async fn lookup(&self, code: &Barcode) -> LookupOutcome {
        LookupCoordinator::lookup(self, code).await
    }
}
