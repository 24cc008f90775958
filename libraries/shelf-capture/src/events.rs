//! Scan Events
//!
//! Event-based communication for UI synchronization during a scan session.
//! Events are queued by the session and drained by the presentation surface
//! after each intent or pump.

use crate::types::ScanPhase;
use serde::{Deserialize, Serialize};
use shelf_core::LookupOutcome;

/// Events emitted by the scan session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Lifecycle phase changed
    PhaseChanged {
        /// The new phase
        phase: ScanPhase,
    },

    /// A barcode was decoded (emitted before any lookup decision)
    CodeScanned {
        /// The decoded symbol
        code: String,
    },

    /// A catalog lookup was dispatched for this code
    LookupStarted {
        /// The code being looked up
        code: String,
    },

    /// The code matched the previous lookup; no network call was made
    LookupSkipped {
        /// The rescanned code
        code: String,
    },

    /// A catalog lookup finished (found, absent, or failed)
    LookupFinished {
        /// The lookup result
        outcome: LookupOutcome,
    },

    /// Camera acquisition or stream failed; the session is torn down
    CameraFailed {
        /// Human-readable cause
        message: String,
    },

    /// Non-fatal decoder error; scanning continues
    DecoderWarning {
        /// Human-readable cause
        message: String,
    },
}
