//! Scan controller - ties the session to the catalog lookup
//!
//! The session alone decides *whether* a decode leads to a lookup; the
//! controller owns the data flow around it: it waits for decode events,
//! routes them through the session, performs the catalog query on an
//! authoritative decode, and attaches the outcome back to the session for
//! the presentation surface to render.

use crate::error::Result;
use crate::events::ScanEvent;
use crate::session::{DecodeAction, ScanSession};
use crate::types::SessionSnapshot;
use shelf_core::{Barcode, LookupOutcome, ProductLookup};
use std::sync::Arc;

/// What one call to [`ScanController::pump`] accomplished.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanUpdate {
    /// A decode was accepted and its catalog lookup finished
    LookupComplete {
        /// The decoded code
        code: Barcode,
        /// The lookup result (also attached to the session)
        outcome: LookupOutcome,
    },

    /// A decode was accepted but matched the previous code; no network call
    DuplicateIgnored {
        /// The rescanned code
        code: Barcode,
    },

    /// Stale or non-decoding event; nothing changed
    Ignored,
}

/// Drives a [`ScanSession`] and a [`ProductLookup`] as one pipeline.
pub struct ScanController {
    session: ScanSession,
    lookup: Arc<dyn ProductLookup>,
}

impl ScanController {
    /// Compose a session with a catalog lookup.
    pub fn new(session: ScanSession, lookup: Arc<dyn ProductLookup>) -> Self {
        Self { session, lookup }
    }

    /// Start scanning (presentation intent).
    pub async fn start(&mut self) -> Result<()> {
        self.session.start().await
    }

    /// Stop scanning (presentation intent). Never fails.
    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Await the next decode event and process it end to end.
    ///
    /// On an authoritative decode of a new code this performs the catalog
    /// lookup and attaches the outcome before returning; the session phase
    /// is already Idle by then, so a failed lookup leaves it Idle.
    pub async fn pump(&mut self) -> ScanUpdate {
        let Some((generation, event)) = self.session.recv_decode().await else {
            return ScanUpdate::Ignored;
        };

        match self.session.handle_decode(generation, event) {
            DecodeAction::Lookup(code) => {
                self.session.begin_lookup(&code);
                let outcome = self.lookup.lookup(&code).await;
                self.session.set_lookup_outcome(outcome.clone());
                ScanUpdate::LookupComplete { code, outcome }
            }
            DecodeAction::Duplicate(code) => ScanUpdate::DuplicateIgnored { code },
            DecodeAction::Ignored => ScanUpdate::Ignored,
        }
    }

    /// Read-only snapshot for the presentation boundary.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Drain queued UI events.
    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        self.session.drain_events()
    }

    /// Direct access to the underlying session.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }
}
