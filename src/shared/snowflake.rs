//! Snowflake ID Generator
//!
//! Time-ordered 64-bit ids, assigned before insert so that file upload paths
//! can be derived from an entity's id at creation time.
//!
//! ```text
//! 63                           22          12          0
//! +-----------------------------+-----------+-----------+
//! |  ms since epoch (41 bits)   | machine   | sequence  |
//! |                             | (10 bits) | (12 bits) |
//! +-----------------------------+-----------+-----------+
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

const MACHINE_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const MACHINE_MASK: u64 = (1 << MACHINE_BITS) - 1;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    epoch_ms: u64,
    machine_id: u64,
    /// Packed `(timestamp << SEQUENCE_BITS) | sequence` of the last issued id.
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new generator for the given epoch and machine id (0-1023).
    pub fn new(epoch_ms: u64, machine_id: u16) -> Self {
        Self {
            epoch_ms,
            machine_id: machine_id as u64 & MACHINE_MASK,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let now = self.elapsed_ms();
        let mut current = self.state.load(Ordering::Relaxed);

        loop {
            let last_ts = current >> SEQUENCE_BITS;
            let next = if now > last_ts {
                now << SEQUENCE_BITS
            } else {
                // Same millisecond (or clock went backwards): bump the sequence,
                // spilling into the next millisecond when it wraps.
                current + 1
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => {
                    let ts = next >> SEQUENCE_BITS;
                    let seq = next & SEQUENCE_MASK;
                    return ((ts << (MACHINE_BITS + SEQUENCE_BITS))
                        | (self.machine_id << SEQUENCE_BITS)
                        | seq) as i64;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Milliseconds since the configured epoch at which `id` was generated.
    pub fn timestamp_of(&self, id: i64) -> u64 {
        ((id as u64) >> (MACHINE_BITS + SEQUENCE_BITS)) + self.epoch_ms
    }

    fn elapsed_ms(&self) -> u64 {
        (Utc::now().timestamp_millis() as u64).saturating_sub(self.epoch_ms)
    }
}
