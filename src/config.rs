//! Timing configuration shared by every playback instance.

use std::time::Duration;

/// Interval between two revealed characters.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Delay between discovering a widget and typing its first character.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(1000);

/// Pause after the last line's delay before the widget is cleared and the
/// cycle restarts.
pub const DEFAULT_RESET_PAUSE: Duration = Duration::from_millis(3000);

/// Shortest reset pause. A cycle always takes some time, so a script whose
/// delays are all zero still moves the clock forward once per pass.
pub const MIN_RESET_PAUSE: Duration = Duration::from_millis(1);

/// Class that marks an element as a terminal demo widget.
pub const TERMINAL_CLASS: &str = "terminal-demo";

/// Attribute a widget can carry to pick a built-in script by name.
pub const SCRIPT_ATTRIBUTE: &str = "data-script";

/// Fixed timing constants of the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub tick: Duration,
    pub start_delay: Duration,
    pub reset_pause: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            start_delay: DEFAULT_START_DELAY,
            reset_pause: DEFAULT_RESET_PAUSE,
        }
    }
}

impl PlaybackConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }

    /// Values below [`MIN_RESET_PAUSE`] are raised to it.
    pub fn with_reset_pause(mut self, reset_pause: Duration) -> Self {
        self.reset_pause = reset_pause.max(MIN_RESET_PAUSE);
        self
    }
}
