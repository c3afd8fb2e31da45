//! Rate limiting implementation
//!
//! Uses the governor crate for token bucket rate limiting, backed by a
//! sliding log of admissions that enforces the per-second ceiling exactly.
//! One limiter is shared by every query issued through the same client handle.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default ceiling for outbound requests
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 100;

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    ///
    /// With a burst of 1 requests are evenly spaced. Larger bursts lower
    /// latency on idle clients; the per-second ceiling holds either way.
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            burst_size: 1,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Evenly spaced requests at the given rate
    pub fn per_second(requests_per_second: u32) -> Self {
        Self::new(requests_per_second, 1)
    }
}

/// Length of the window the ceiling applies to
const WINDOW: Duration = Duration::from_secs(1);

/// Margin added to the window before a logged admission expires, so a call
/// observed just after its admission still lands outside the window.
const WINDOW_SLACK: Duration = Duration::from_millis(1);

/// Token bucket rate limiter with a hard per-second ceiling
///
/// Governor paces admissions; a log of the last `requests_per_second`
/// admission instants then holds back any call that would put more than
/// `requests_per_second` admissions inside one second.
///
/// Cloning is cheap and clones share the same bucket and log.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    admitted: Arc<Mutex<VecDeque<Instant>>>,
    ceiling: usize,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(rate)
            .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
            admitted: Arc::new(Mutex::new(VecDeque::with_capacity(rate.get() as usize))),
            ceiling: rate.get() as usize,
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;

        // the lock is held while sleeping so waiters are admitted in order
        let mut admitted = self.admitted.lock().await;
        loop {
            let now = Instant::now();
            while admitted
                .front()
                .is_some_and(|oldest| now.duration_since(*oldest) >= WINDOW + WINDOW_SLACK)
            {
                admitted.pop_front();
            }

            match admitted.front() {
                Some(&oldest) if admitted.len() >= self.ceiling => {
                    tokio::time::sleep_until(oldest + WINDOW + WINDOW_SLACK).await;
                }
                _ => {
                    admitted.push_back(Instant::now());
                    return;
                }
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("ceiling", &self.ceiling)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_second, 100);
        assert_eq!(config.burst_size, 1);
    }

    #[test]
    fn test_rate_limiter_config_per_second() {
        let config = RateLimiterConfig::per_second(50);
        assert_eq!(config, RateLimiterConfig::new(50, 1));
    }

    #[test]
    fn test_zero_rate_falls_back_to_one() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        assert_eq!(limiter.ceiling, 1);
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_second(50));
        let start = Instant::now();

        for _ in 0..6 {
            limiter.wait().await;
        }

        // first permit is immediate, the other five are 20ms apart
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn test_burst_is_capped_by_window() {
        // the bucket alone would admit 5 at once and refill 4 more in a second
        let limiter = RateLimiter::new(&RateLimiterConfig::new(4, 5));
        let start = Instant::now();

        for _ in 0..5 {
            limiter.wait().await;
        }

        assert!(start.elapsed() >= WINDOW);
    }

    #[tokio::test]
    async fn test_clones_share_window() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(2, 2));
        let other = limiter.clone();
        let start = Instant::now();

        limiter.wait().await;
        other.wait().await;
        limiter.wait().await;

        assert!(start.elapsed() >= WINDOW);
    }
}
