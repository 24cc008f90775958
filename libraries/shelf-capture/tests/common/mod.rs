//! Fake capture capabilities for integration tests.
//!
//! No real camera: the fakes record every acquired stream and started
//! decoder so tests can assert the leak-freedom guarantees from outside.

use async_trait::async_trait;
use shelf_capture::{
    CameraError, CameraFacing, CameraProvider, CameraStream, DecodeEvent, DecodeSink,
    DecoderError, DecoderHandle, FrameSourceId, SymbolDecoder,
};
use shelf_core::{Barcode, LookupOutcome, ProductLookup};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ===== Camera =====

#[derive(Default)]
struct FakeCameraInner {
    fail_with: Mutex<Option<CameraError>>,
    never_resolve: AtomicBool,
    streams: Mutex<Vec<Arc<AtomicBool>>>,
    next_source: AtomicU64,
}

/// Scriptable camera provider. Clones share state, so tests keep one copy
/// for assertions and hand a boxed clone to the session.
#[derive(Clone, Default)]
pub struct FakeCamera {
    inner: Arc<FakeCameraInner>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every acquisition fails with this error.
    pub fn failing(err: CameraError) -> Self {
        let camera = Self::default();
        *camera.inner.fail_with.lock().unwrap() = Some(err);
        camera
    }

    /// Acquisition never resolves (permission prompt hanging forever).
    pub fn pending() -> Self {
        let camera = Self::default();
        camera.inner.never_resolve.store(true, Ordering::SeqCst);
        camera
    }

    /// Stop failing: subsequent acquisitions succeed.
    pub fn recover(&self) {
        *self.inner.fail_with.lock().unwrap() = None;
    }

    pub fn provider(&self) -> Box<dyn CameraProvider> {
        Box::new(self.clone())
    }

    /// Number of streams ever acquired.
    pub fn acquired(&self) -> usize {
        self.inner.streams.lock().unwrap().len()
    }

    /// Whether the nth acquired stream still has live tracks.
    pub fn stream_active(&self, index: usize) -> bool {
        self.inner.streams.lock().unwrap()[index].load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraProvider for FakeCamera {
    async fn acquire(
        &self,
        _facing: CameraFacing,
    ) -> Result<Box<dyn CameraStream>, CameraError> {
        if self.inner.never_resolve.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        if let Some(err) = self.inner.fail_with.lock().unwrap().clone() {
            return Err(err);
        }

        let active = Arc::new(AtomicBool::new(true));
        self.inner.streams.lock().unwrap().push(active.clone());
        let id = self.inner.next_source.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream { id, active }))
    }
}

struct FakeStream {
    id: u64,
    active: Arc<AtomicBool>,
}

impl CameraStream for FakeStream {
    fn frame_source(&self) -> FrameSourceId {
        FrameSourceId::new(self.id)
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

// ===== Decoder =====

#[derive(Default)]
struct FakeDecoderInner {
    sink: Mutex<Option<DecodeSink>>,
    stopped: Mutex<Vec<Arc<AtomicBool>>>,
    fail_start: Mutex<Option<DecoderError>>,
}

/// Scriptable decoder: tests push decode events through the sink captured
/// at the most recent `start()`.
#[derive(Clone, Default)]
pub struct FakeDecoder {
    inner: Arc<FakeDecoderInner>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: DecoderError) -> Self {
        let decoder = Self::default();
        *decoder.inner.fail_start.lock().unwrap() = Some(err);
        decoder
    }

    pub fn decoder(&self) -> Box<dyn SymbolDecoder> {
        Box::new(self.clone())
    }

    /// Push a raw decode event through the current instance's sink.
    pub fn push(&self, event: DecodeEvent) {
        self.inner
            .sink
            .lock()
            .unwrap()
            .as_ref()
            .expect("decoder was never started")
            .push(event);
    }

    pub fn push_symbol(&self, text: &str) {
        self.push(DecodeEvent::Symbol {
            text: text.to_string(),
        });
    }

    /// Number of decoder instances ever started.
    pub fn started(&self) -> usize {
        self.inner.stopped.lock().unwrap().len()
    }

    /// Whether the nth started instance was stopped.
    pub fn instance_stopped(&self, index: usize) -> bool {
        self.inner.stopped.lock().unwrap()[index].load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymbolDecoder for FakeDecoder {
    async fn start(
        &self,
        _source: FrameSourceId,
        sink: DecodeSink,
    ) -> Result<Box<dyn DecoderHandle>, DecoderError> {
        if let Some(err) = self.inner.fail_start.lock().unwrap().clone() {
            return Err(err);
        }

        *self.inner.sink.lock().unwrap() = Some(sink);
        let stopped = Arc::new(AtomicBool::new(false));
        self.inner.stopped.lock().unwrap().push(stopped.clone());
        Ok(Box::new(FakeHandle { stopped }))
    }
}

struct FakeHandle {
    stopped: Arc<AtomicBool>,
}

impl DecoderHandle for FakeHandle {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

// ===== Catalog lookup =====

/// Scripted lookup that counts invocations.
pub struct FakeLookup {
    outcome: Mutex<LookupOutcome>,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn returning(outcome: LookupOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductLookup for FakeLookup {
    async fn lookup(&self, _code: &Barcode) -> LookupOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.lock().unwrap().clone()
    }
}
