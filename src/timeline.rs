//! [`Timeline`] — runs a controller against a virtual clock.
//!
//! Nothing sleeps: the timeline keeps the due time of the single pending
//! callback and fires it when the clock is moved past it. This makes the
//! exact timing of every reveal observable without waiting on real timers.

use crate::config::PlaybackConfig;
use crate::controller::PlaybackController;
use crate::sink::LineSink;
use std::time::Duration;

pub struct Timeline<S> {
    controller: PlaybackController,
    sink: S,
    now: Duration,
    next_due: Option<Duration>,
}

impl<S: LineSink> Timeline<S> {
    /// Start at time zero with the first callback due after the start delay.
    pub fn new(controller: PlaybackController, sink: S, config: &PlaybackConfig) -> Self {
        Self {
            controller,
            sink,
            now: Duration::ZERO,
            next_due: Some(config.start_delay),
        }
    }

    /// Jump to the pending callback and run it. Returns the time it fired
    /// at, or `None` if playback has halted.
    pub fn step(&mut self) -> Option<Duration> {
        let due = self.next_due?;
        self.now = due;
        self.next_due = self
            .controller
            .advance(&mut self.sink)
            .map(|delay| due + delay);
        Some(due)
    }

    /// Run every callback due at or before `time`, then move the clock to it.
    pub fn run_until(&mut self, time: Duration) {
        while self.next_due.is_some_and(|due| due <= time) {
            self.step();
        }
        self.now = self.now.max(time);
    }

    /// Move the clock forward by `delta`.
    pub fn advance_by(&mut self, delta: Duration) {
        self.run_until(self.now + delta);
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
