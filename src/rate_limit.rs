//! Fixed-window rate limiting keyed by client.
//!
//! Each limiter instance carries its own policy and bucket map, so the
//! coarse global gate and the stricter per-route gate are independent
//! instances rather than shared global state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Bucket {
    count: u32,
    reset_at: Instant,
}

/// Per-client request counter with a lazily reset window.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for `key` and decide whether it may proceed.
    ///
    /// Infallible: a missing or expired bucket is reset to a fresh window
    /// counting this request.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());

        match buckets.get_mut(key) {
            Some(bucket) if now <= bucket.reset_at => {
                if bucket.count < self.max_requests {
                    bucket.count += 1;
                    true
                } else {
                    false
                }
            }
            _ => {
                buckets.insert(
                    key.to_string(),
                    Bucket {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}
