//! Sliding-window rate limiter keyed by user id.
//!
//! Uses DashMap for thread-safe concurrent access; entries older than the
//! window are pruned on every check.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Clone)]
pub struct RateLimiter {
    requests: DashMap<u64, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: DashMap::new(),
            max_requests,
            time_window,
        }
    }

    /// Record one request for `user_id`; false when the user is over budget.
    pub fn check_rate_limit(&self, user_id: u64) -> bool {
        let now = Instant::now();
        let mut entry = self.requests.entry(user_id).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_allows_under_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(1));
        assert!(limiter.check_rate_limit(1));
        assert!(limiter.check_rate_limit(1));
    }

    #[test]
    fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(1));
        assert!(limiter.check_rate_limit(1));
        assert!(!limiter.check_rate_limit(1));
    }

    #[test]
    fn test_users_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));

        assert!(limiter.check_rate_limit(1));
        assert!(limiter.check_rate_limit(2));
        assert!(!limiter.check_rate_limit(1));
        assert!(!limiter.check_rate_limit(2));
    }

    #[tokio::test]
    async fn test_resets_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(100));

        assert!(limiter.check_rate_limit(1));
        assert!(!limiter.check_rate_limit(1));

        sleep(Duration::from_millis(150)).await;
        assert!(limiter.check_rate_limit(1));
    }
}
