use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{BlockId, BlockKind};

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Creates `"{type}-{unix_millis}"` block ids.
///
/// Monotonic per generator: when the clock has not moved since the last id
/// the millisecond part is bumped instead, so one generator never repeats.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
    clock: fn() -> u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_clock(unix_millis)
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self { last: 0, clock }
    }

    pub fn next_id(&mut self, kind: &BlockKind) -> BlockId {
        let stamp = (self.clock)().max(self.last + 1);
        self.last = stamp;
        BlockId::new(format!("{}-{stamp}", kind.tag()))
    }
}
