//! Shelf Scan - Capture and Session Management
//!
//! Platform-agnostic scan-session lifecycle for Shelf Scan.
//!
//! This crate provides:
//! - The scan-session state machine (Idle -> Starting -> Scanning ->
//!   Stopping -> Idle, plus error transitions)
//! - Leak-free camera stream ownership (phase-gated handles)
//! - Decode-event deduplication and the handoff into a catalog lookup
//! - A pending-event queue for UI synchronization
//!
//! # Architecture
//!
//! `shelf-capture` is completely platform-agnostic: the camera and the
//! symbol decoder are opaque capabilities injected as trait objects, so the
//! whole lifecycle is testable with fakes and no real camera. The
//! presentation surface is an external collaborator that reads
//! [`SessionSnapshot`]s, drains [`ScanEvent`]s, and issues `start()` /
//! `stop()` intents.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_capture::{ScanController, ScanConfig, ScanSession, ScanUpdate};
//! use std::sync::Arc;
//!
//! # async fn run(
//! #     camera: Box<dyn shelf_capture::CameraProvider>,
//! #     decoder: Box<dyn shelf_capture::SymbolDecoder>,
//! #     catalog: Arc<dyn shelf_core::ProductLookup>,
//! # ) -> shelf_capture::Result<()> {
//! let session = ScanSession::new(camera, decoder, ScanConfig::default());
//! let mut controller = ScanController::new(session, catalog);
//!
//! controller.start().await?;
//! if let ScanUpdate::LookupComplete { code, outcome } = controller.pump().await {
//!     println!("{code}: {outcome:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod controller;
mod error;
mod session;

pub mod camera;
pub mod decoder;
pub mod events;
pub mod types;

// Public exports
pub use camera::{CameraFacing, CameraProvider, CameraStream, FrameSourceId};
pub use controller::{ScanController, ScanUpdate};
pub use decoder::{DecodeEvent, DecodeSink, DecoderHandle, SymbolDecoder};
pub use error::{CameraError, DecoderError, Result};
pub use events::ScanEvent;
pub use session::{DecodeAction, ScanSession};
pub use types::{ScanConfig, ScanPhase, SessionSnapshot};
