use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::time::{Duration, interval};

use crate::metrics::ACTIVE_SESSIONS;

// Rate limit entry - one per session, replaced when the window expires
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_time: i64, // epoch millis when the window rolls over
}

// Outcome of a single check. Rejection is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub success: bool,
    pub remaining: u32,
    pub reset_time: i64,
}

// Fixed-window counter keyed by session id. The store is process-local:
// running N instances multiplies the effective limit by N.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    // Check-and-increment for one session
    pub fn check(&self, session_id: &str, max_requests: u32, window_ms: i64) -> RateLimitResult {
        self.check_at(Utc::now().timestamp_millis(), session_id, max_requests, window_ms)
    }

    fn check_at(
        &self,
        now: i64,
        session_id: &str,
        max_requests: u32,
        window_ms: i64,
    ) -> RateLimitResult {
        let mut entry = self
            .entries
            .entry(session_id.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                reset_time: now + window_ms,
            });

        // Fresh session, or previous window fully elapsed..? Start a new one
        if entry.count == 0 || now > entry.reset_time {
            entry.count = 1;
            entry.reset_time = now + window_ms;
            return RateLimitResult {
                success: true,
                remaining: max_requests.saturating_sub(1),
                reset_time: entry.reset_time,
            };
        }

        // Over the limit. A rejected call does not bump the count
        if entry.count >= max_requests {
            return RateLimitResult {
                success: false,
                remaining: 0,
                reset_time: entry.reset_time,
            };
        }

        entry.count += 1;
        RateLimitResult {
            success: true,
            remaining: max_requests - entry.count,
            reset_time: entry.reset_time,
        }
    }

    // Two-phase sweep: collect the expired keys first, then remove exactly
    // those. Returns how many entries were dropped.
    pub fn cleanup_expired_entries(&self) -> usize {
        self.cleanup_expired_at(Utc::now().timestamp_millis())
    }

    fn cleanup_expired_at(&self, now: i64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|e| now > e.reset_time)
            .map(|e| e.key().clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// Background sweep - runs every `every` for the lifetime of the process

pub async fn cleanup_task(limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    println!("Cleanup task started (interval: {:?})", every);

    loop {
        interval.tick().await;

        let removed = limiter.cleanup_expired_entries();
        ACTIVE_SESSIONS.set(limiter.len() as f64);

        if removed > 0 {
            println!(
                "[Cleanup] Removed {} expired session entries, {} remaining",
                removed,
                limiter.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_succeeds_with_full_window() {
        let limiter = RateLimiter::new();

        let res = limiter.check_at(0, "fresh", 20, 60_000);
        assert!(res.success);
        assert_eq!(res.remaining, 19);
        assert_eq!(res.reset_time, 60_000);
    }

    #[test]
    fn limit_exhausts_then_resets_after_window() {
        let limiter = RateLimiter::new();

        assert_eq!(limiter.check_at(0, "abc", 3, 1000).remaining, 2);
        assert_eq!(limiter.check_at(10, "abc", 3, 1000).remaining, 1);
        assert_eq!(limiter.check_at(20, "abc", 3, 1000).remaining, 0);

        let rejected = limiter.check_at(30, "abc", 3, 1000);
        assert!(!rejected.success);
        assert_eq!(rejected.remaining, 0);

        // window rolled over - counter resets fully, not gradually
        let after = limiter.check_at(1001, "abc", 3, 1000);
        assert!(after.success);
        assert_eq!(after.remaining, 2);
        assert_eq!(after.reset_time, 2001);
    }

    #[test]
    fn rejected_calls_keep_count_and_reset_time() {
        let limiter = RateLimiter::new();

        let first = limiter.check_at(0, "s", 1, 1000);
        assert!(first.success);

        let rejected_a = limiter.check_at(1, "s", 1, 1000);
        let rejected_b = limiter.check_at(500, "s", 1, 1000);
        assert!(!rejected_a.success);
        assert!(!rejected_b.success);
        assert_eq!(rejected_a.reset_time, first.reset_time);
        assert_eq!(rejected_b.reset_time, first.reset_time);

        // now == reset_time is still inside the window
        assert!(!limiter.check_at(1000, "s", 1, 1000).success);
        assert!(limiter.check_at(1001, "s", 1, 1000).success);
    }

    #[test]
    fn sessions_do_not_interfere() {
        let limiter = RateLimiter::new();

        limiter.check_at(0, "a", 1, 1000);
        assert!(!limiter.check_at(1, "a", 1, 1000).success);

        let b = limiter.check_at(2, "b", 1, 1000);
        assert!(b.success);
        assert_eq!(b.remaining, 0);
    }

    #[test]
    fn check_with_real_clock() {
        let limiter = RateLimiter::new();

        let res = limiter.check("fresh", 20, 60_000);
        assert!(res.success);
        assert_eq!(res.remaining, 19);
        assert!(res.reset_time > 0);
    }

    #[test]
    fn cleanup_removes_only_expired_entries() {
        let limiter = RateLimiter::new();

        limiter.check_at(0, "old", 3, 1000);
        limiter.check_at(0, "older", 3, 500);
        limiter.check_at(900, "live", 3, 1000);
        limiter.check_at(0, "boundary", 3, 1500);

        // "boundary" resets exactly at the sweep time and must survive
        assert_eq!(limiter.cleanup_expired_at(1500), 2);
        assert_eq!(limiter.len(), 2);

        // the surviving session keeps its count
        assert_eq!(limiter.check_at(1000, "live", 3, 1000).remaining, 1);
    }

    #[test]
    fn cleanup_on_empty_store_is_a_noop() {
        let limiter = RateLimiter::new();

        assert_eq!(limiter.cleanup_expired_at(1), 0);
        assert!(limiter.is_empty());
    }
}
