//! Error types for capture and scan-session management

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera acquisition/stream errors.
///
/// Fatal to the current session attempt: the state machine tears everything
/// down and surfaces the error to the presentation boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraError {
    /// The user or platform denied camera access
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    /// No video-capable input matches the requested facing preference
    #[error("no matching camera device: {0}")]
    NoDevice(String),

    /// The device exists but another consumer holds it
    #[error("camera device already in use: {0}")]
    DeviceInUse(String),

    /// The stream died after acquisition (also used for promoted decoder
    /// stream failures)
    #[error("camera stream failure: {0}")]
    Stream(String),

    /// Anything else the platform reports
    #[error("camera error: {0}")]
    Other(String),
}

/// Decoder errors.
///
/// `Decode` is non-fatal: the session logs it and keeps scanning. `Stream`
/// is actually a camera/stream failure and is promoted to [`CameraError`].
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoderError {
    /// A frame could not be processed; scanning continues
    #[error("decode error: {0}")]
    Decode(String),

    /// The underlying frame source failed; fatal to the session
    #[error("frame source failure: {0}")]
    Stream(String),
}

impl DecoderError {
    /// True when this error means the camera/stream itself is gone.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DecoderError::Stream(_))
    }

    /// Promote a stream failure to the camera error it really is.
    pub(crate) fn promote(&self) -> CameraError {
        CameraError::Stream(self.to_string())
    }
}

/// Result type for capture operations.
pub type Result<T> = std::result::Result<T, CameraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_errors_are_fatal() {
        assert!(DecoderError::Stream("track ended".into()).is_fatal());
        assert!(!DecoderError::Decode("blurry frame".into()).is_fatal());
    }

    #[test]
    fn promotion_keeps_the_cause() {
        let promoted = DecoderError::Stream("track ended".into()).promote();
        match promoted {
            CameraError::Stream(msg) => assert!(msg.contains("track ended")),
            other => panic!("expected Stream, got {other:?}"),
        }
    }
}
