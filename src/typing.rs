//! [`TypingLine`] — reveals one scripted line character by character.

use crate::script::{LineDescriptor, LineKind};
use crate::sink::LineSink;
use tracing::trace;

/// Outcome of a single typing tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeProgress {
    /// More characters remain; tick again after the typing cadence.
    Typing,
    /// The last character was revealed by this tick.
    Complete,
    /// The line was already complete; nothing was written.
    Done,
}

/// A line being typed into a sink.
///
/// [`begin`](Self::begin) appends the empty line element, then each
/// [`tick`](Self::tick) reveals one more character. Completion is reported
/// once; later ticks never touch the line again.
#[derive(Debug, Clone)]
pub struct TypingLine {
    kind: LineKind,
    text: String,
    revealed: usize,
    total: usize,
}

impl TypingLine {
    /// Append a new empty line for `descriptor` and prepare to type it.
    pub fn begin(sink: &mut dyn LineSink, descriptor: &LineDescriptor) -> Self {
        sink.append_line(descriptor.kind());
        Self {
            kind: descriptor.kind(),
            text: descriptor.text().to_string(),
            revealed: 0,
            total: descriptor.char_count(),
        }
    }

    /// Reveal the next character.
    pub fn tick(&mut self, sink: &mut dyn LineSink) -> TypeProgress {
        if self.is_complete() {
            return TypeProgress::Done;
        }
        self.revealed += 1;
        sink.reveal(self.prefix());
        trace!(kind = ?self.kind, revealed = self.revealed, total = self.total, "tick");

        if self.is_complete() {
            TypeProgress::Complete
        } else {
            TypeProgress::Typing
        }
    }

    /// The currently revealed prefix of the text.
    pub fn prefix(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }

    /// Characters revealed so far.
    pub fn char_index(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }
}
