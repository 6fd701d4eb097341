//! [`AnsiSink`] — renders playback into a real terminal with ANSI escapes.

use crate::script::LineKind;
use crate::sink::LineSink;
use std::io::{self, Write};
use std::sync::Arc;

type OutputHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

const COMMAND_STYLE: &str = "\x1b[1;32m";
const RESET_STYLE: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// A line sink that writes escape sequences to an output handler.
///
/// Command lines are drawn bold green, output lines in the terminal's
/// default style. Revealing a prefix redraws the current row.
pub struct AnsiSink {
    output_handler: OutputHandler,
    lines: usize,
    kind: LineKind,
}

impl AnsiSink {
    /// Write to stdout.
    pub fn stdout() -> Self {
        Self::with_handler(|data| {
            let mut stdout = io::stdout();
            // A closed stdout leaves nothing to draw on.
            let _ = stdout.write_all(data).and_then(|_| stdout.flush());
        })
    }

    /// Write to any byte sink.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        Self {
            output_handler: Arc::new(handler),
            lines: 0,
            kind: LineKind::Output,
        }
    }

    fn emit(&self, data: &str) {
        (self.output_handler)(data.as_bytes());
    }
}

impl LineSink for AnsiSink {
    fn is_attached(&self) -> bool {
        true
    }

    fn append_line(&mut self, kind: LineKind) {
        if self.lines > 0 {
            self.emit("\r\n");
        }
        self.lines += 1;
        self.kind = kind;
    }

    fn reveal(&mut self, prefix: &str) {
        let styled = match self.kind {
            LineKind::Command => format!("{CLEAR_LINE}{COMMAND_STYLE}{prefix}{RESET_STYLE}"),
            LineKind::Output => format!("{CLEAR_LINE}{prefix}"),
        };
        self.emit(&styled);
    }

    fn clear(&mut self) {
        self.emit(CLEAR_SCREEN);
        self.lines = 0;
    }
}
