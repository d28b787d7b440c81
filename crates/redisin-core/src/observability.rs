use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters updated by the drain loop.
#[derive(Debug, Default)]
pub struct DrainStats {
    pop_attempts: AtomicU64,
    empty_polls: AtomicU64,
    events_emitted: AtomicU64,
}

impl DrainStats {
    pub fn record_pop_attempt(&self) {
        self.pop_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_poll(&self) {
        self.empty_polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emitted(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DrainCounts {
        DrainCounts {
            pop_attempts: self.pop_attempts.load(Ordering::Relaxed),
            empty_polls: self.empty_polls.load(Ordering::Relaxed),
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainCounts {
    pub pop_attempts: u64,
    pub empty_polls: u64,
    pub events_emitted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let stats = DrainStats::default();
        stats.record_pop_attempt();
        stats.record_pop_attempt();
        stats.record_empty_poll();
        stats.record_emitted();

        assert_eq!(
            stats.snapshot(),
            DrainCounts {
                pop_attempts: 2,
                empty_polls: 1,
                events_emitted: 1,
            }
        );
    }

    #[test]
    fn counts_serialize_as_flat_json() {
        let json = serde_json::to_value(DrainCounts::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "pop_attempts": 0, "empty_polls": 0, "events_emitted": 0 })
        );
    }
}
