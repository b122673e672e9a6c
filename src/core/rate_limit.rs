use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Minimum-interval gate between consecutive backend calls.
///
/// The interval runs from the moment the previous call finished, so a slow
/// reply never eats into the pause before the next request. The first call
/// passes immediately.
#[derive(Debug)]
pub struct CallGate {
    min_interval: Duration,
    last_finished: Option<Instant>,
}

impl CallGate {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_finished: None }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next call may start
    pub async fn wait(&self) {
        if let Some(last) = self.last_finished {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                debug!("Rate limit: waiting {:?} before next backend call", ready_at - now);
                tokio::time::sleep_until(ready_at).await;
            }
        }
    }

    /// Record that a call just finished, successfully or not
    pub fn finished(&mut self) {
        self.last_finished = Some(Instant::now());
    }
}
