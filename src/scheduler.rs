//! The [`Scheduler`] seam between playback and real time.

use async_trait::async_trait;
use std::time::Duration;

/// Something that can suspend a playback task for a while.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on tokio timers. Under `tokio::time::pause` the delays elapse on
/// tokio's virtual clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_uses_tokio_clock() {
        let start = tokio::time::Instant::now();
        TokioScheduler.sleep(Duration::from_millis(3000)).await;
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }
}
