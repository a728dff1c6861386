//! Timestamped cache entries.

use std::time::{Duration, Instant};

/// A cache payload with its creation instant. Validity is
/// `now - created < ttl`; the TTL itself lives in [`super::CacheConfig`]
/// so each section can age independently.
#[derive(Debug, Clone)]
pub struct TimedEntry<T> {
    payload: T,
    created: Instant,
}

impl<T> TimedEntry<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            created: Instant::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.created.elapsed() < ttl
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Build an entry that is already `age` old. Test hook for expiry paths.
    #[cfg(test)]
    pub fn aged(payload: T, age: Duration) -> Self {
        Self {
            payload,
            created: Instant::now() - age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_within_ttl() {
        let entry = TimedEntry::new(42);
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert_eq!(*entry.payload(), 42);
    }

    #[test]
    fn aged_entry_expires() {
        let entry = TimedEntry::aged("stale", Duration::from_secs(120));
        assert!(!entry.is_fresh(Duration::from_secs(60)));
        assert!(entry.is_fresh(Duration::from_secs(300)));
    }
}
