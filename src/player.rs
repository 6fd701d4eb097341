//! [`Player`] — drives a [`PlaybackController`] on a [`Scheduler`].

use crate::config::PlaybackConfig;
use crate::controller::{Phase, PlaybackController};
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::sink::LineSink;
use std::time::Duration;
use tracing::debug;

/// Why a player stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The sink left the page.
    Detached,
    /// The requested number of complete cycles was played.
    CycleLimit(u64),
}

/// Owns one controller, its sink and its single pending timer.
pub struct Player<S, C = TokioScheduler> {
    controller: PlaybackController,
    sink: S,
    scheduler: C,
    start_delay: Duration,
    cycle_limit: Option<u64>,
}

impl<S: LineSink> Player<S> {
    /// A player sleeping on tokio timers.
    pub fn new(controller: PlaybackController, sink: S, config: &PlaybackConfig) -> Self {
        Player {
            controller,
            sink,
            scheduler: TokioScheduler,
            start_delay: config.start_delay,
            cycle_limit: None,
        }
    }
}

impl<S: LineSink, C: Scheduler> Player<S, C> {
    /// Replace the scheduler the player sleeps on.
    pub fn with_scheduler<D: Scheduler>(self, scheduler: D) -> Player<S, D> {
        Player {
            controller: self.controller,
            sink: self.sink,
            scheduler,
            start_delay: self.start_delay,
            cycle_limit: self.cycle_limit,
        }
    }

    /// Stop once the script has been played to the end `cycles` times,
    /// before the reset pause. A limit of zero plays nothing. Without a limit
    /// the player loops until its sink is detached.
    pub fn with_cycle_limit(mut self, cycles: u64) -> Self {
        self.cycle_limit = Some(cycles);
        self
    }

    /// Wait the start delay, then run the controller until it halts or the
    /// cycle limit is reached.
    pub async fn run(mut self) -> PlaybackEnd {
        if self.cycle_limit == Some(0) {
            return PlaybackEnd::CycleLimit(0);
        }
        self.scheduler.sleep(self.start_delay).await;
        loop {
            let Some(delay) = self.controller.advance(&mut self.sink) else {
                debug!("playback stopped: sink detached");
                return PlaybackEnd::Detached;
            };
            let exhausted = self.controller.phase() == Phase::Resetting;
            let cycles = self.controller.cycles();
            if let Some(limit) = self.cycle_limit.filter(|&n| exhausted && cycles >= n) {
                debug!(cycles = limit, "playback stopped: cycle limit reached");
                return PlaybackEnd::CycleLimit(limit);
            }
            self.scheduler.sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Container, Document};
    use crate::script::{LineKind, Script};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records requested delays and returns immediately.
    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<Duration>>>);

    #[async_trait]
    impl Scheduler for Recording {
        async fn sleep(&self, delay: Duration) {
            self.0.lock().unwrap().push(delay);
        }
    }

    #[tokio::test]
    async fn test_delays_follow_the_script() {
        let mut doc = Document::new();
        let c = doc.insert(Container::new(["terminal-demo"]));
        let script = Script::from_entries(&[(LineKind::Command, "ab", 400)]).unwrap();
        let config = PlaybackConfig::default();
        let recording = Recording::default();

        let end = Player::new(PlaybackController::new(script, &config), c.clone(), &config)
            .with_scheduler(recording.clone())
            .with_cycle_limit(2)
            .run()
            .await;

        assert_eq!(end, PlaybackEnd::CycleLimit(2));
        let ms = |n| Duration::from_millis(n);
        assert_eq!(
            *recording.0.lock().unwrap(),
            vec![ms(1000), ms(50), ms(400), ms(3000), ms(50), ms(400)]
        );
        assert_eq!(c.texts(), vec!["ab"]);
    }

    #[tokio::test]
    async fn test_detached_sink_ends_playback() {
        let c = Container::new(["terminal-demo"]);
        let script = Script::from_entries(&[(LineKind::Output, "x", 0)]).unwrap();
        let config = PlaybackConfig::default();
        let end = Player::new(PlaybackController::new(script, &config), c, &config)
            .with_scheduler(Recording::default())
            .run()
            .await;
        assert_eq!(end, PlaybackEnd::Detached);
    }

    #[tokio::test]
    async fn test_zero_cycle_limit_plays_nothing() {
        let mut doc = Document::new();
        let c = doc.insert(Container::new(["terminal-demo"]));
        let script = Script::from_entries(&[(LineKind::Command, "$ ls", 1000)]).unwrap();
        let config = PlaybackConfig::default();
        let recording = Recording::default();

        let end = Player::new(PlaybackController::new(script, &config), c.clone(), &config)
            .with_scheduler(recording.clone())
            .with_cycle_limit(0)
            .run()
            .await;

        assert_eq!(end, PlaybackEnd::CycleLimit(0));
        assert!(recording.0.lock().unwrap().is_empty());
        assert_eq!(c.line_count(), 0);
    }
}
