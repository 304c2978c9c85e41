//! Fixed-window rate limiter with adaptive backoff.
//!
//! At most `permits_per_interval` permits are handed out per window. When the
//! resolver signals throttling, every caller is held back for a backoff that
//! doubles with each consecutive signal (capped), until a success resets it.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct ThrottleState {
    window_start: Instant,
    used: u32,
    blocked_until: Option<Instant>,
    consecutive_signals: u32,
}

#[derive(Debug)]
pub struct Throttle {
    permits_per_interval: u32,
    interval: Duration,
    max_backoff: Duration,
    state: Mutex<ThrottleState>,
}

impl Throttle {
    pub fn new(permits_per_interval: u32, interval: Duration, max_backoff: Duration) -> Self {
        Self {
            permits_per_interval: permits_per_interval.max(1),
            interval,
            max_backoff,
            state: Mutex::new(ThrottleState {
                window_start: Instant::now(),
                used: 0,
                blocked_until: None,
                consecutive_signals: 0,
            }),
        }
    }

    /// Waits until a permit is available and takes it.
    pub async fn acquire(&self) {
        loop {
            let wait_until = {
                let now = Instant::now();
                let mut state = self.state.lock();

                match state.blocked_until {
                    Some(until) if now < until => Some(until),
                    _ => {
                        state.blocked_until = None;
                        if now.duration_since(state.window_start) >= self.interval {
                            state.window_start = now;
                            state.used = 0;
                        }
                        if state.used < self.permits_per_interval {
                            state.used += 1;
                            None
                        } else {
                            Some(state.window_start + self.interval)
                        }
                    }
                }
            };

            match wait_until {
                None => return,
                Some(deadline) => {
                    tracing::trace!(target: "throttle", "Waiting {:?} for a permit",
                        deadline.saturating_duration_since(Instant::now()));
                    tokio::time::sleep_until(deadline).await;
                }
            }
        }
    }

    /// Records that the upstream asked us to slow down.
    pub fn signal_throttled(&self) {
        let mut state = self.state.lock();
        state.consecutive_signals = state.consecutive_signals.saturating_add(1);
        let factor = 1u32 << (state.consecutive_signals - 1).min(16);
        let backoff = self.interval.saturating_mul(factor).min(self.max_backoff);
        let until = Instant::now() + backoff;
        state.blocked_until = Some(match state.blocked_until {
            Some(existing) if existing > until => existing,
            _ => until,
        });
        tracing::warn!(target: "throttle",
            "Resolver signalled throttling ({} in a row), backing off for {:?}",
            state.consecutive_signals, backoff);
    }

    /// Records a successful upstream response, resetting the backoff.
    pub fn signal_ok(&self) {
        let mut state = self.state.lock();
        if state.consecutive_signals > 0 {
            tracing::debug!(target: "throttle", "Resolver recovered, resetting backoff");
        }
        state.consecutive_signals = 0;
    }

    pub fn current_backoff(&self) -> Option<Duration> {
        let state = self.state.lock();
        state
            .blocked_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn permits_within_window_are_immediate() {
        let throttle = Throttle::new(3, Duration::from_millis(100), Duration::from_secs(1));
        let start = Instant::now();
        for _ in 0..3 {
            throttle.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_window_waits_for_next() {
        let throttle = Throttle::new(2, Duration::from_millis(100), Duration::from_secs(1));
        let start = Instant::now();
        for _ in 0..5 {
            throttle.acquire().await;
        }
        // Windows: [0,0] [100,100] [200]
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn throttled_signal_backs_off_and_doubles() {
        let throttle = Throttle::new(10, Duration::from_millis(100), Duration::from_millis(250));

        throttle.signal_throttled();
        assert_eq!(throttle.current_backoff(), Some(Duration::from_millis(100)));
        throttle.signal_throttled();
        assert_eq!(throttle.current_backoff(), Some(Duration::from_millis(200)));
        throttle.signal_throttled();
        assert_eq!(throttle.current_backoff(), Some(Duration::from_millis(250)));

        let start = Instant::now();
        throttle.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_millis(250));

        throttle.signal_ok();
        throttle.signal_throttled();
        assert_eq!(throttle.current_backoff(), Some(Duration::from_millis(100)));
    }
}
