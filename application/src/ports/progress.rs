//! Turn progress port
//!
//! Defines how the rendering layer follows a conversation turn while the
//! assistant answer streams in.

use raimon_domain::Model;

/// Callback for progress updates during one conversation turn
///
/// Implementations live in the presentation layer and can display the
/// answer in various ways (console, web UI, etc.)
pub trait TurnObserver: Send + Sync {
    /// Called once the request has been sent, before the first fragment.
    fn on_stream_start(&self, model: &Model);

    /// Called for each text fragment, in arrival order.
    fn on_stream_chunk(&self, chunk: &str);

    /// Called after the last fragment, whether the stream succeeded or not.
    fn on_stream_end(&self) {}
}

/// No-op observer for when nothing is rendered
pub struct NoTurnObserver;

impl TurnObserver for NoTurnObserver {
    fn on_stream_start(&self, _model: &Model) {}
    fn on_stream_chunk(&self, _chunk: &str) {}
}
