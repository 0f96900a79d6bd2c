/// Running latency/size statistics for one bucket.
///
/// `min` and `max` read as 0 while the accumulator is empty, which is what
/// the report prints for an empty bucket. `sum` and `bytes` saturate at
/// `u64::MAX` rather than wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatAccumulator {
    count: u64,
    min: u64,
    max: u64,
    sum: u64,
    bytes: u64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, value_ms: u64, value_bytes: u64) {
        if self.count == 0 {
            self.min = value_ms;
            self.max = value_ms;
        } else {
            self.min = self.min.min(value_ms);
            self.max = self.max.max(value_ms);
        }

        self.count += 1;
        self.sum = self.sum.saturating_add(value_ms);
        self.bytes = self.bytes.saturating_add(value_bytes);
    }

    /// Combine two partial accumulators as if their records had been folded
    /// into one.
    pub fn merge(&mut self, other: &StatAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum = self.sum.saturating_add(other.sum);
        self.bytes = self.bytes.saturating_add(other.bytes);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Truncated mean, 0 when empty.
    pub fn avg(&self) -> u64 {
        self.sum.checked_div(self.count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
