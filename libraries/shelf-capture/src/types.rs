//! Core types for scan-session management

use crate::camera::CameraFacing;
use crate::error::CameraError;
use serde::{Deserialize, Serialize};
use shelf_core::{Barcode, LookupOutcome};

/// Scan-session lifecycle phase.
///
/// Resource ownership is phase-gated: the camera handle may only be live in
/// {Starting, Scanning, Stopping}, the decoder handle in {Starting,
/// Scanning}. Outside those phases no capture hardware is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPhase {
    /// No session; no resources held
    Idle,

    /// Camera acquisition / decoder startup in progress
    Starting,

    /// Continuous decode loop running
    Scanning,

    /// Teardown after an authoritative decode
    Stopping,

    /// The last start attempt failed; no resources held
    Error,
}

impl ScanPhase {
    /// True while the session may legitimately hold a camera stream.
    pub fn camera_live(self) -> bool {
        matches!(
            self,
            ScanPhase::Starting | ScanPhase::Scanning | ScanPhase::Stopping
        )
    }
}

/// Configuration for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Facing preference for camera acquisition (default: Rear)
    pub facing: CameraFacing,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Rear,
        }
    }
}

/// Read-only view of the session for the presentation boundary.
///
/// Everything the sink renders comes from here; it never reaches into the
/// session's owned resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current lifecycle phase
    pub phase: ScanPhase,

    /// Error from the last failed start attempt, if any
    pub error: Option<CameraError>,

    /// Last decoded barcode (retained for display after teardown)
    pub last_decoded: Option<Barcode>,

    /// Result of the most recent lookup, if one has finished
    pub outcome: Option<LookupOutcome>,

    /// Whether a catalog lookup is currently in flight
    pub lookup_in_progress: bool,
}
