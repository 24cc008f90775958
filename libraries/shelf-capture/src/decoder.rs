//! Symbol decoder boundary
//!
//! The decoding algorithm itself is an opaque capability: given a live frame
//! source it repeatedly attempts symbol decoding and pushes events through a
//! generation-tagged sink until explicitly stopped.

use crate::camera::FrameSourceId;
use crate::error::DecoderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One decoder callback invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeEvent {
    /// A symbol was decoded from a frame
    Symbol {
        /// The decoded payload text
        text: String,
    },

    /// The frame contained no decodable symbol
    NoMatch,

    /// The decoder hit an error
    Error {
        /// What went wrong; `Stream` variants are fatal to the session
        error: DecoderError,
    },
}

/// Generation-tagged channel the decoder pushes events into.
///
/// The session compares the tag against its current generation and discards
/// stale events, so a decoder whose `stop()` is not instantaneous cannot
/// re-trigger a torn-down session.
#[derive(Debug, Clone)]
pub struct DecodeSink {
    generation: u64,
    tx: mpsc::UnboundedSender<(u64, DecodeEvent)>,
}

impl DecodeSink {
    pub(crate) fn new(generation: u64, tx: mpsc::UnboundedSender<(u64, DecodeEvent)>) -> Self {
        Self { generation, tx }
    }

    /// Deliver one decode event. Never blocks; delivery failures (receiver
    /// gone) are silently dropped since they only occur past teardown.
    pub fn push(&self, event: DecodeEvent) {
        let _ = self.tx.send((self.generation, event));
    }
}

/// Starts continuous symbol decoding against a frame source.
#[async_trait]
pub trait SymbolDecoder: Send + Sync {
    /// Bind to the frame source and begin decoding. Events flow through the
    /// sink until the returned handle is stopped.
    async fn start(
        &self,
        source: FrameSourceId,
        sink: DecodeSink,
    ) -> std::result::Result<Box<dyn DecoderHandle>, DecoderError>;
}

/// A running decoder instance.
pub trait DecoderHandle: Send {
    /// Halt decoding. Total, non-throwing, idempotent.
    fn stop(&mut self);
}
