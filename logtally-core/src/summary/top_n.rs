use ahash::RandomState;
use std::collections::HashMap;

/// Frequency table over an open set of labels.
///
/// Every distinct label is kept, since a label's rank can change as counts
/// grow. Labels are stored in first-observed order, which is what breaks ties
/// in [`TopNCounter::top`].
#[derive(Debug, Clone, Default)]
pub struct TopNCounter {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize, RandomState>,
}

impl TopNCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, label: &str) {
        self.add(label, 1);
    }

    fn add(&mut self, label: &str, count: u64) {
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), count));
            }
        }
    }

    /// The `n` most frequent labels, highest count first, ties in
    /// first-observed order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();

        // Stable sort keeps first-observed order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Fold `other` into `self`. Merging partial counters in input order
    /// keeps first-observed order identical to a sequential pass.
    pub fn merge(&mut self, other: &TopNCounter) {
        for (label, count) in &other.entries {
            self.add(label, *count);
        }
    }

    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }
}
