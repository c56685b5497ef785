//! Request rate limiting using a token bucket.
//!
//! Enforces the global MangaDex request budget: a fixed number of burst
//! permits, with one permit earned back per refill interval.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// A fixed request-rate budget: `burst` permits, one earned back every
/// `refill_interval`.
#[derive(Debug, Clone, Copy)]
pub struct RateBudget {
    /// Time to earn one permit back
    pub refill_interval: Duration,
    /// Maximum number of permits available at once
    pub burst: u32,
}

impl Default for RateBudget {
    fn default() -> Self {
        Self {
            refill_interval: Duration::from_secs(2),
            burst: 5,
        }
    }
}

/// Token bucket state: permits on hand and when the last permit was
/// credited (or will be, for reserved permits).
#[derive(Debug)]
struct Bucket {
    available: u32,
    last_refill: Instant,
}

impl Bucket {
    /// Credit permits earned since the last refill, capped at burst
    fn refill(&mut self, now: Instant, budget: &RateBudget) {
        let elapsed = now.saturating_duration_since(self.last_refill);
        let earned = (elapsed.as_nanos() / budget.refill_interval.as_nanos())
            .min(u128::from(budget.burst)) as u32;
        if earned == 0 {
            return;
        }

        self.available = self.available.saturating_add(earned).min(budget.burst);
        if self.available == budget.burst {
            // Excess credit is discarded once the bucket is full
            self.last_refill = now;
        } else {
            self.last_refill += budget.refill_interval * earned;
        }
    }
}

/// Rate limiter shared by every outbound API call.
///
/// Waiters reserve their permit under the lock and sleep outside it, so
/// permits are granted in the order tasks arrive at [`acquire`].
///
/// [`acquire`]: RateLimiter::acquire
#[derive(Debug)]
pub struct RateLimiter {
    budget: RateBudget,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Create a new rate limiter with a full bucket
    pub fn new(budget: RateBudget) -> Self {
        Self {
            budget,
            bucket: Mutex::new(Bucket {
                available: budget.burst,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Wait until a permit is available and consume it.
    ///
    /// Permits are never refunded: a request that fails after the grant
    /// still counts against the budget. A zero refill interval disables
    /// throttling entirely.
    pub async fn acquire(&self) {
        if self.budget.refill_interval.is_zero() {
            return;
        }

        let ready_at = {
            let mut bucket = self.bucket.lock().await;
            let now = Instant::now();
            bucket.refill(now, &self.budget);

            if bucket.available > 0 {
                bucket.available -= 1;
                return;
            }

            // Bucket is empty: reserve the next permit to be earned
            let ready_at = bucket.last_refill + self.budget.refill_interval;
            bucket.last_refill = ready_at;
            ready_at
        };

        let wait = ready_at.saturating_duration_since(Instant::now());
        tracing::debug!(
            wait_ms = wait.as_millis(),
            "Rate limit: waiting for permit"
        );
        sleep_until(ready_at).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn budget(interval_ms: u64, burst: u32) -> RateBudget {
        RateBudget {
            refill_interval: Duration::from_millis(interval_ms),
            burst,
        }
    }

    #[tokio::test]
    async fn test_burst_granted_immediately() {
        let limiter = RateLimiter::new(budget(200, 3));

        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_call_past_burst_waits_a_refill_interval() {
        let limiter = RateLimiter::new(budget(100, 2));

        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(90)); // Allow some tolerance
    }

    #[tokio::test]
    async fn test_concurrent_burst_respects_ceiling() {
        let limiter = Arc::new(RateLimiter::new(budget(80, 2)));

        let start = Instant::now();
        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                start.elapsed()
            }));
        }

        let mut grants = Vec::new();
        for handle in handles {
            grants.push(handle.await.unwrap());
        }
        grants.sort();

        // Two permits inside the first interval, the rest pushed out by
        // one interval each.
        assert!(grants[1] < Duration::from_millis(60));
        assert!(grants[2] >= Duration::from_millis(70));
        assert!(grants[3] >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_bucket_refills_up_to_burst() {
        let limiter = RateLimiter::new(budget(30, 2));

        for _ in 0..2 {
            limiter.acquire().await;
        }

        // Both permits should have been earned back by now
        tokio::time::sleep(Duration::from_millis(100)).await;

        let start = Instant::now();
        for _ in 0..2 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(budget(0, 1));

        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
