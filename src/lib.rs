//! # termreel
//!
//! A scripted terminal playback engine for animated "fake terminal" demo
//! widgets.
//!
//! A [`Script`] is a fixed list of command and output lines. Every widget on
//! a page gets its own [`PlaybackController`] that types each line one
//! character at a time, pauses after it, and once the script is exhausted
//! clears the widget and starts over, forever.
//!
//! ## Quick start
//!
//! ```no_run
//! use termreel::{Container, Document, InstanceManager, TERMINAL_CLASS};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut page = Document::new();
//!     let widget = page.insert(Container::new([TERMINAL_CLASS]));
//!
//!     let mut manager = InstanceManager::with_defaults()?;
//!     manager.start(&page);
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     println!("{:?}", widget.texts());
//!     Ok(())
//! }
//! ```
//!
//! ## Timing
//!
//! | Setting | Default | Meaning |
//! |---------|---------|---------|
//! | `tick` | 50 ms | Interval between revealed characters |
//! | `start_delay` | 1000 ms | Delay before a widget types its first character |
//! | `reset_pause` | 3000 ms | Pause after the last line before the widget is cleared |
//!
//! Each line additionally carries its own post-line delay.
//!
//! ## Deterministic playback
//!
//! [`PlaybackController::advance`] never sleeps: it runs the callback due now
//! and returns the delay until the next one. [`Player`] drives it on a
//! [`Scheduler`] (tokio timers by default) and [`Timeline`] drives it on a
//! virtual clock:
//!
//! ```
//! use std::time::Duration;
//! use termreel::{
//!     Container, Document, LineKind, PlaybackConfig, PlaybackController, Script, Timeline,
//! };
//!
//! let mut page = Document::new();
//! let widget = page.insert(Container::new(["terminal-demo"]));
//! let config = PlaybackConfig::default();
//! let script = Script::from_entries(&[(LineKind::Command, "$ ls", 1000)]).unwrap();
//!
//! let controller = PlaybackController::new(script, &config);
//! let mut timeline = Timeline::new(controller, widget.clone(), &config);
//! timeline.run_until(Duration::from_millis(1100));
//! assert_eq!(widget.texts(), vec!["$ l"]);
//! ```
//!
//! ## Custom surfaces
//!
//! Implement [`LineSink`] to render playback anywhere:
//!
//! ```
//! use termreel::{LineKind, LineSink};
//!
//! #[derive(Default)]
//! pub struct Transcript(Vec<String>);
//!
//! impl LineSink for Transcript {
//!     fn is_attached(&self) -> bool { true }
//!     fn append_line(&mut self, _kind: LineKind) { self.0.push(String::new()); }
//!     fn reveal(&mut self, prefix: &str) {
//!         if let Some(line) = self.0.last_mut() {
//!             *line = prefix.to_string();
//!         }
//!     }
//!     fn clear(&mut self) { self.0.clear(); }
//! }
//! ```

pub mod ansi;
pub mod config;
pub mod controller;
pub mod manager;
pub mod page;
pub mod player;
pub mod scheduler;
pub mod script;
pub mod sink;
pub mod timeline;
pub mod typing;

pub use ansi::AnsiSink;
pub use config::{PlaybackConfig, SCRIPT_ATTRIBUTE, TERMINAL_CLASS};
pub use controller::{Phase, PlaybackController, PlaybackState};
pub use manager::InstanceManager;
pub use page::{Container, Document, ElementId, RenderedLine};
pub use player::{PlaybackEnd, Player};
pub use scheduler::{Scheduler, TokioScheduler};
pub use script::{LineDescriptor, LineKind, Script};
pub use sink::LineSink;
pub use timeline::Timeline;
pub use typing::{TypeProgress, TypingLine};
