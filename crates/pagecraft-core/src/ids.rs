// crates/pagecraft-core/src/ids.rs
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{ComponentId, ComponentTree};

/// Hands out component ids.
///
/// Ids are decimal strings of a monotonically increasing counter seeded from
/// wall-clock milliseconds, so they look like the ids older documents carry
/// and never repeat within a session even when two nodes are created in the
/// same millisecond.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(1);
        Self::starting_at(seed)
    }

    /// Deterministic generator, mostly for tests.
    pub fn starting_at(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Next id not already used anywhere in `tree`.
    pub fn next_id(&mut self, tree: &ComponentTree) -> ComponentId {
        loop {
            let candidate = ComponentId::new(self.next.to_string());
            self.next = self.next.wrapping_add(1);
            if !tree.contains(&candidate) {
                return candidate;
            }
        }
    }
}
