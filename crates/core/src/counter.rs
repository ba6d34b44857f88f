//! Per-route call counting.
//!
//! Purely diagnostic: counts reset on restart and nothing in the core reads them.

use dashmap::DashMap;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CallCounter {
    counts: DashMap<String, u64>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one call to `endpoint` (a route template such as `/users/:user_id`).
    pub fn record(&self, method: &str, endpoint: &str) {
        *self
            .counts
            .entry(format!("{} {}", method, endpoint))
            .or_insert(0) += 1;
    }

    pub fn get(&self, method: &str, endpoint: &str) -> u64 {
        self.counts
            .get(&format!("{} {}", method, endpoint))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Sorted copy of every counter.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }
}
