//! [`PlaybackController`] — the per-widget state machine that sequences typed
//! lines, inter-line delays and the loop reset.
//!
//! The controller never sleeps. Each call to [`advance`](PlaybackController::advance)
//! runs the callback that is due now and returns how long to wait before the
//! next one, so whoever drives it owns the single pending timer.

use crate::config::{MIN_RESET_PAUSE, PlaybackConfig};
use crate::script::Script;
use crate::sink::LineSink;
use crate::typing::{TypeProgress, TypingLine};
use std::time::Duration;
use tracing::debug;

/// Where the controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending work: before the first line and right after a reset.
    Idle,
    /// Typing `script[index]`.
    TypingLine(usize),
    /// `script[index]` is fully typed; waiting out its delay.
    WaitingDelay(usize),
    /// The script is exhausted; waiting out the reset pause.
    Resetting,
    /// The container left the page. Nothing further is scheduled.
    Halted,
}

/// Observable position of a controller within its script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Number of fully rendered lines, `0..=script.len()`.
    pub script_index: usize,
    /// Characters revealed on the current line.
    pub char_index: usize,
}

/// Replays one [`Script`] into one sink, forever.
#[derive(Debug)]
pub struct PlaybackController {
    script: Script,
    tick: Duration,
    reset_pause: Duration,
    phase: Phase,
    script_index: usize,
    typing: Option<TypingLine>,
    cycles: u64,
}

impl PlaybackController {
    pub fn new(script: Script, config: &PlaybackConfig) -> Self {
        Self {
            script,
            tick: config.tick,
            reset_pause: config.reset_pause.max(MIN_RESET_PAUSE),
            phase: Phase::Idle,
            script_index: 0,
            typing: None,
            cycles: 0,
        }
    }

    /// Run the callback that is due now.
    ///
    /// Returns the delay until the next callback, or `None` once the sink is
    /// detached, after which the controller stays [`Phase::Halted`].
    pub fn advance(&mut self, sink: &mut dyn LineSink) -> Option<Duration> {
        loop {
            if !sink.is_attached() {
                if self.phase != Phase::Halted {
                    debug!(phase = ?self.phase, "container detached, halting playback");
                    self.phase = Phase::Halted;
                }
                return None;
            }

            match self.phase {
                Phase::Idle => self.begin_line(sink),
                Phase::TypingLine(index) => return Some(self.type_next(index, sink)),
                Phase::WaitingDelay(_) => {
                    if self.script_index < self.script.len() {
                        self.begin_line(sink);
                    } else {
                        self.phase = Phase::Resetting;
                        self.cycles += 1;
                        debug!(cycles = self.cycles, pause = ?self.reset_pause, "script exhausted");
                        return Some(self.reset_pause);
                    }
                }
                Phase::Resetting => {
                    sink.clear();
                    self.script_index = 0;
                    self.typing = None;
                    self.phase = Phase::Idle;
                    debug!("container cleared, restarting cycle");
                }
                Phase::Halted => return None,
            }
        }
    }

    fn begin_line(&mut self, sink: &mut dyn LineSink) {
        let index = self.script_index;
        let Some(descriptor) = self.script.get(index) else {
            // Unreachable: scripts are never empty.
            self.phase = Phase::Resetting;
            return;
        };
        debug!(index, kind = ?descriptor.kind(), "typing line");
        self.typing = Some(TypingLine::begin(sink, descriptor));
        self.phase = Phase::TypingLine(index);
    }

    fn type_next(&mut self, index: usize, sink: &mut dyn LineSink) -> Duration {
        let progress = match self.typing.as_mut() {
            Some(typing) => typing.tick(sink),
            None => TypeProgress::Done,
        };
        match progress {
            TypeProgress::Typing => self.tick,
            TypeProgress::Complete | TypeProgress::Done => {
                self.script_index = index + 1;
                self.phase = Phase::WaitingDelay(index);
                self.script
                    .get(index)
                    .map_or(Duration::ZERO, |line| line.delay())
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            script_index: self.script_index,
            char_index: self.typing.as_ref().map_or(0, TypingLine::char_index),
        }
    }

    /// Number of times the script has been played to the end.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn script(&self) -> &Script {
        &self.script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Container, Document};
    use crate::script::LineKind::{Command, Output};

    fn setup(
        entries: &[(crate::script::LineKind, &str, u64)],
    ) -> (Document, Container, PlaybackController) {
        let mut doc = Document::new();
        let c = doc.insert(Container::new(["terminal-demo"]));
        let script = Script::from_entries(entries).unwrap();
        let controller = PlaybackController::new(script, &PlaybackConfig::default());
        (doc, c, controller)
    }

    fn ms(n: u64) -> Option<Duration> {
        Some(Duration::from_millis(n))
    }

    #[test]
    fn test_single_line_cycle() {
        let (_doc, mut c, mut ctl) = setup(&[(Command, "$ ls", 1000)]);
        assert_eq!(ctl.phase(), Phase::Idle);

        assert_eq!(ctl.advance(&mut c), ms(50));
        assert_eq!(c.texts(), vec!["$"]);
        assert_eq!(ctl.phase(), Phase::TypingLine(0));
        assert_eq!(ctl.advance(&mut c), ms(50));
        assert_eq!(ctl.advance(&mut c), ms(50));
        assert_eq!(ctl.state(), PlaybackState { script_index: 0, char_index: 3 });

        assert_eq!(ctl.advance(&mut c), ms(1000));
        assert_eq!(c.texts(), vec!["$ ls"]);
        assert_eq!(ctl.phase(), Phase::WaitingDelay(0));
        assert_eq!(ctl.state().script_index, 1);

        assert_eq!(ctl.advance(&mut c), ms(3000));
        assert_eq!(ctl.phase(), Phase::Resetting);
        assert_eq!(ctl.cycles(), 1);
        assert_eq!(c.line_count(), 1);

        assert_eq!(ctl.advance(&mut c), ms(50));
        assert_eq!(c.texts(), vec!["$"]);
        assert_eq!(ctl.state(), PlaybackState { script_index: 0, char_index: 1 });
    }

    #[test]
    fn test_zero_delays_run_back_to_back() {
        let (_doc, mut c, mut ctl) = setup(&[(Command, "a", 0), (Output, "b", 0)]);
        assert_eq!(ctl.advance(&mut c), ms(0));
        assert_eq!(ctl.advance(&mut c), ms(0));
        assert_eq!(c.texts(), vec!["a", "b"]);
        assert_eq!(c.lines()[1].kind, Output);
        assert_eq!(ctl.advance(&mut c), ms(3000));
        assert_eq!(ctl.phase(), Phase::Resetting);
    }

    #[test]
    fn test_rendered_lines_track_script_index() {
        let (_doc, mut c, mut ctl) =
            setup(&[(Command, "ab", 10), (Output, "cde", 20), (Output, "f", 0)]);
        for _ in 0..20 {
            ctl.advance(&mut c);
            let state = ctl.state();
            match ctl.phase() {
                Phase::TypingLine(_) => assert_eq!(c.line_count(), state.script_index + 1),
                Phase::WaitingDelay(_) | Phase::Resetting => {
                    assert_eq!(c.line_count(), state.script_index)
                }
                other => panic!("unexpected phase {other:?}"),
            }
            assert!(state.script_index <= 3);
        }
    }

    #[test]
    fn test_detach_halts() {
        let (mut doc, mut c, mut ctl) = setup(&[(Command, "$ ls", 1000)]);
        ctl.advance(&mut c);
        doc.remove(&c);
        assert_eq!(ctl.advance(&mut c), None);
        assert_eq!(ctl.phase(), Phase::Halted);
        assert_eq!(ctl.advance(&mut c), None);
        assert_eq!(c.texts(), vec!["$"]);
    }

    #[test]
    fn test_custom_timing() {
        let mut doc = Document::new();
        let mut c = doc.insert(Container::new(["terminal-demo"]));
        let config = PlaybackConfig::default()
            .with_tick(Duration::from_millis(5))
            .with_reset_pause(Duration::from_millis(7));
        let script = Script::from_entries(&[(Command, "xy", 1)]).unwrap();
        let mut ctl = PlaybackController::new(script, &config);
        assert_eq!(ctl.advance(&mut c), ms(5));
        assert_eq!(ctl.advance(&mut c), ms(1));
        assert_eq!(ctl.advance(&mut c), ms(7));
    }

    #[test]
    fn test_zero_reset_pause_is_raised() {
        let mut doc = Document::new();
        let mut c = doc.insert(Container::new(["terminal-demo"]));
        let config = PlaybackConfig {
            tick: Duration::ZERO,
            start_delay: Duration::ZERO,
            reset_pause: Duration::ZERO,
        };
        let script = Script::from_entries(&[(Command, "a", 0)]).unwrap();
        let mut ctl = PlaybackController::new(script, &config);
        assert_eq!(ctl.advance(&mut c), ms(0));
        assert_eq!(ctl.advance(&mut c), ms(1));
        assert_eq!(ctl.phase(), Phase::Resetting);
    }
}
