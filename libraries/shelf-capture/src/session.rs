//! Scan session state machine - core orchestration
//!
//! Owns the Idle -> Starting -> Scanning -> (Stopping) -> Idle lifecycle and
//! mediates between the camera provider and the symbol decoder. Correctness
//! rests on phase-gated resource ownership: there is one logical writer (the
//! event loop driving this session), so no locks are needed. The handles are
//! simply `None` in every phase that does not declare them live.

use crate::camera::{CameraProvider, CameraStream};
use crate::decoder::{DecodeEvent, DecodeSink, DecoderHandle, SymbolDecoder};
use crate::error::{CameraError, Result};
use crate::events::ScanEvent;
use crate::types::{ScanConfig, ScanPhase, SessionSnapshot};
use shelf_core::{Barcode, LookupOutcome};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What the session decided about one decode event.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeAction {
    /// Authoritative decode of a new code: the caller should run a lookup
    Lookup(Barcode),

    /// Authoritative decode matching the last looked-up code: skip the
    /// network, the UI still reflects the rescanned code
    Duplicate(Barcode),

    /// Stale, non-decoding, or swallowed event: nothing to do
    Ignored,
}

/// The scan session - the sole mutable entity of the scanner core.
///
/// Created once per mounted presentation surface, destroyed (all resources
/// released) when that surface is torn down or explicitly stopped.
pub struct ScanSession {
    config: ScanConfig,

    // Injected capabilities
    camera_provider: Box<dyn CameraProvider>,
    symbol_decoder: Box<dyn SymbolDecoder>,

    // State
    phase: ScanPhase,
    camera: Option<Box<dyn CameraStream>>,
    decoder: Option<Box<dyn DecoderHandle>>,
    last_decoded: Option<Barcode>,
    error: Option<CameraError>,
    outcome: Option<LookupOutcome>,
    lookup_in_progress: bool,

    // Session-generation token; decode events carry the generation of the
    // decoder instance that produced them, stale events are discarded
    generation: u64,

    // Long-lived decode channel; senders are handed to decoder instances
    decode_tx: mpsc::UnboundedSender<(u64, DecodeEvent)>,
    decode_rx: mpsc::UnboundedReceiver<(u64, DecodeEvent)>,

    // Event queue for UI synchronization
    pending_events: Vec<ScanEvent>,
}

impl ScanSession {
    /// Create a new session over the given capabilities.
    pub fn new(
        camera_provider: Box<dyn CameraProvider>,
        symbol_decoder: Box<dyn SymbolDecoder>,
        config: ScanConfig,
    ) -> Self {
        let (decode_tx, decode_rx) = mpsc::unbounded_channel();
        Self {
            config,
            camera_provider,
            symbol_decoder,
            phase: ScanPhase::Idle,
            camera: None,
            decoder: None,
            last_decoded: None,
            error: None,
            outcome: None,
            lookup_in_progress: false,
            generation: 0,
            decode_tx,
            decode_rx,
            pending_events: Vec::new(),
        }
    }

    // ===== Intents =====

    /// Start scanning.
    ///
    /// If a session is already live it is fully stopped first (handles
    /// released) before a new camera is acquired. Clears the previous error
    /// and lookup result; the dedupe key is deliberately retained so a rapid
    /// rescan of the same physical barcode does not re-query the catalog.
    ///
    /// Suspension points: camera acquisition and decoder startup. A camera
    /// failure releases any partially acquired resource, records the error,
    /// and leaves the session in [`ScanPhase::Error`]. A decoder-startup
    /// failure is a stream failure in disguise and is treated the same way.
    pub async fn start(&mut self) -> Result<()> {
        if self.phase.camera_live() {
            self.stop();
        }

        self.generation = self.generation.wrapping_add(1);
        self.error = None;
        self.outcome = None;
        self.lookup_in_progress = false;
        self.set_phase(ScanPhase::Starting);
        debug!(
            facing = ?self.config.facing,
            generation = self.generation,
            "starting scan session"
        );

        let camera = match self.camera_provider.acquire(self.config.facing).await {
            Ok(stream) => stream,
            Err(err) => return Err(self.fail_start(err)),
        };
        let source = camera.frame_source();
        self.camera = Some(camera);

        let sink = DecodeSink::new(self.generation, self.decode_tx.clone());
        match self.symbol_decoder.start(source, sink).await {
            Ok(handle) => {
                self.decoder = Some(handle);
                self.set_phase(ScanPhase::Scanning);
                info!(generation = self.generation, "scan session live");
                Ok(())
            }
            Err(err) => Err(self.fail_start(err.promote())),
        }
    }

    /// Stop scanning.
    ///
    /// Safe to call from any state, including Starting before a handle
    /// exists, and never fails. Both resources are released synchronously
    /// before the session reports Idle; no lookup is triggered.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.release_resources();
        if self.phase != ScanPhase::Idle {
            self.set_phase(ScanPhase::Idle);
        }
    }

    // ===== Decode events =====

    /// Receive the next decode event from the current (or a stale) decoder.
    ///
    /// Returns `None` only if the channel closed, which cannot happen while
    /// the session lives since it retains a sender.
    pub async fn recv_decode(&mut self) -> Option<(u64, DecodeEvent)> {
        self.decode_rx.recv().await
    }

    /// Run one decode event through the state machine.
    ///
    /// Only the first `Symbol` after entering Scanning is authoritative: it
    /// tears the decoder and camera down *before* any lookup is initiated,
    /// so at most one camera session is ever active per decode. Events from
    /// a previous generation, or arriving once the phase has left Scanning,
    /// are no-ops.
    pub fn handle_decode(&mut self, generation: u64, event: DecodeEvent) -> DecodeAction {
        if generation != self.generation || self.phase != ScanPhase::Scanning {
            debug!(generation, phase = ?self.phase, "discarding stale decode event");
            return DecodeAction::Ignored;
        }

        match event {
            DecodeEvent::Symbol { text } => self.handle_symbol(&text),
            DecodeEvent::NoMatch => DecodeAction::Ignored,
            DecodeEvent::Error { error } if error.is_fatal() => {
                let promoted = error.promote();
                warn!(error = %promoted, "decoder reported a stream failure, tearing down");
                self.fail_start(promoted);
                DecodeAction::Ignored
            }
            DecodeEvent::Error { error } => {
                // Non-fatal: logged and swallowed, decoding continues
                debug!(error = %error, "non-fatal decoder error, scanning continues");
                self.pending_events.push(ScanEvent::DecoderWarning {
                    message: error.to_string(),
                });
                DecodeAction::Ignored
            }
        }
    }

    fn handle_symbol(&mut self, text: &str) -> DecodeAction {
        let code = match Barcode::parse(text) {
            Ok(code) => code,
            Err(err) => {
                warn!(error = %err, "decoder produced an unusable symbol");
                return DecodeAction::Ignored;
            }
        };

        info!(code = %code, "symbol decoded, stopping capture before lookup");
        self.pending_events.push(ScanEvent::CodeScanned {
            code: code.to_string(),
        });

        // Teardown first: subsequent in-flight callbacks from this decoder
        // instance become stale the moment the generation advances.
        self.set_phase(ScanPhase::Stopping);
        self.generation = self.generation.wrapping_add(1);
        self.release_resources();
        self.set_phase(ScanPhase::Idle);

        let duplicate = self.last_decoded.as_ref() == Some(&code);
        self.last_decoded = Some(code.clone());
        if duplicate {
            debug!(code = %code, "same code as last lookup, skipping catalog call");
            self.pending_events.push(ScanEvent::LookupSkipped {
                code: code.to_string(),
            });
            DecodeAction::Duplicate(code)
        } else {
            DecodeAction::Lookup(code)
        }
    }

    // ===== Lookup bookkeeping =====

    /// Record that a catalog lookup was dispatched for `code`.
    pub fn begin_lookup(&mut self, code: &Barcode) {
        self.lookup_in_progress = true;
        self.pending_events.push(ScanEvent::LookupStarted {
            code: code.to_string(),
        });
    }

    /// Attach a finished lookup's outcome.
    ///
    /// Lookup failures never abort the state machine: the outcome is all
    /// that changes, the phase stays wherever it is (Idle after a decode).
    pub fn set_lookup_outcome(&mut self, outcome: LookupOutcome) {
        self.lookup_in_progress = false;
        self.pending_events.push(ScanEvent::LookupFinished {
            outcome: outcome.clone(),
        });
        self.outcome = Some(outcome);
    }

    // ===== State queries =====

    /// Current lifecycle phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Whether capture hardware is currently engaged.
    pub fn is_camera_active(&self) -> bool {
        self.camera.as_ref().is_some_and(|camera| camera.is_active())
    }

    /// Error from the last failed start attempt, if any.
    pub fn error(&self) -> Option<&CameraError> {
        self.error.as_ref()
    }

    /// Last decoded barcode.
    pub fn last_decoded(&self) -> Option<&Barcode> {
        self.last_decoded.as_ref()
    }

    /// Read-only snapshot for the presentation boundary.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            error: self.error.clone(),
            last_decoded: self.last_decoded.clone(),
            outcome: self.outcome.clone(),
            lookup_in_progress: self.lookup_in_progress,
        }
    }

    /// Drain queued UI events.
    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    /// Fail the current attempt: release everything, record the error.
    ///
    /// Returns the error for propagation so callers can `return Err(...)`.
    fn fail_start(&mut self, err: CameraError) -> CameraError {
        warn!(error = %err, "scan session failed");
        self.generation = self.generation.wrapping_add(1);
        self.release_resources();
        self.error = Some(err.clone());
        self.pending_events.push(ScanEvent::CameraFailed {
            message: err.to_string(),
        });
        self.set_phase(ScanPhase::Error);
        err
    }

    /// Release decoder then camera, synchronously. Idempotent.
    ///
    /// The decoder goes first so no further frames are consumed while the
    /// media tracks are being stopped.
    fn release_resources(&mut self) {
        if let Some(mut decoder) = self.decoder.take() {
            decoder.stop();
        }
        if let Some(mut camera) = self.camera.take() {
            camera.stop();
        }
    }

    fn set_phase(&mut self, phase: ScanPhase) {
        debug_assert!(
            phase.camera_live() || (self.camera.is_none() && self.decoder.is_none()),
            "handles must be released before leaving a live phase"
        );
        self.phase = phase;
        self.pending_events.push(ScanEvent::PhaseChanged { phase });
    }
}

// A surface that drops the session without stopping it first must not leak
// capture hardware; both handles are released unconditionally.
impl Drop for ScanSession {
    fn drop(&mut self) {
        self.release_resources();
    }
}
