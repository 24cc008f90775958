//! Camera resource boundary
//!
//! Acquiring a camera engages real capture hardware (indicator light,
//! battery). Implementations must make `stop()` halt every underlying media
//! track, not merely detach a rendering sink.

use crate::error::CameraError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which way the requested camera should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    /// User-facing camera
    Front,

    /// World-facing camera (the useful one for shelf scanning)
    #[default]
    Rear,
}

/// Opaque handle identifying a live video frame source.
///
/// Produced by a [`CameraStream`], consumed by the decoder when binding to
/// the stream. Carries no platform detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSourceId(u64);

impl FrameSourceId {
    /// Wrap a platform-assigned source identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Acquires physical camera streams.
///
/// No automatic retries: a failed acquisition is reported once and the
/// caller decides what to do with it.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Request a video-capable input matching the facing preference, bind it
    /// to the rendering sink, and start playback.
    async fn acquire(&self, facing: CameraFacing)
        -> std::result::Result<Box<dyn CameraStream>, CameraError>;
}

/// A live, exclusively-owned camera stream.
pub trait CameraStream: Send {
    /// Handle for binding a decoder to this stream's frames.
    fn frame_source(&self) -> FrameSourceId;

    /// Stop every underlying media track. Idempotent and total.
    fn stop(&mut self);

    /// Whether the capture hardware is still engaged.
    fn is_active(&self) -> bool;
}
