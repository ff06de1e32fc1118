//! Scan Tally
//!
//! Running count of scanned items per SKU for a single checkout session.

use rustc_hash::FxHashMap;

/// Scanned quantity per SKU
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTally {
    counts: FxHashMap<String, u64>,
}

impl ScanTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more scan of `sku` and return its new quantity.
    pub fn record(&mut self, sku: &str) -> u64 {
        if let Some(count) = self.counts.get_mut(sku) {
            *count = count.saturating_add(1);

            return *count;
        }

        self.counts.insert(sku.to_string(), 1);

        1
    }

    /// Quantity scanned for `sku`, zero if never scanned.
    pub fn quantity(&self, sku: &str) -> u64 {
        self.counts.get(sku).copied().unwrap_or_default()
    }

    /// Iterate `(sku, quantity)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(sku, quantity)| (sku.as_str(), *quantity))
    }

    /// Number of distinct SKUs scanned.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of scans across every SKU.
    pub fn item_count(&self) -> u64 {
        self.counts
            .values()
            .fold(0, |total, quantity| total.saturating_add(*quantity))
    }
}

impl<'s> FromIterator<&'s str> for ScanTally {
    fn from_iter<I: IntoIterator<Item = &'s str>>(skus: I) -> Self {
        let mut tally = Self::new();

        for sku in skus {
            tally.record(sku);
        }

        tally
    }
}
