//! Events produced while an answer is being generated.

/// One step of a streamed answer.
///
/// Producers emit any number of `Delta`s followed by exactly one terminal
/// event. Nothing is emitted after `Completed` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Next piece of answer text, to be shown immediately.
    Delta(String),
    /// Stream finished; carries the concatenation of all deltas.
    Completed(String),
    /// Stream aborted; carries a human-readable reason.
    Error(String),
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Delta(_))
    }
}
