use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyMap};

/// Best-known extent for a single key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeEntry {
    pub extent: u32,
    pub is_estimated: bool,
}

/// Per-key cache of measured and estimated item extents.
///
/// Entries are created for keys that were rendered (`touch`) or measured (`record`). Entries for
/// keys that left the sequence are garbage: they are never needed for correctness and can be
/// evicted with [`SizeStore::retain`]. If a key is recorded twice the last write wins, which is
/// also how duplicate keys degrade.
#[derive(Clone, Debug)]
pub struct SizeStore<K> {
    entries: KeyMap<K, SizeEntry>,
    estimated_size: u32,
    measured: usize,
}

impl<K: KeyCacheKey> SizeStore<K> {
    /// Creates an empty store. A zero estimate is clamped to `1`.
    pub fn new(estimated_size: u32) -> Self {
        Self {
            entries: KeyMap::default(),
            estimated_size: estimated_size.max(1),
            measured: 0,
        }
    }

    pub fn estimated_size(&self) -> u32 {
        self.estimated_size
    }

    /// Changes the fallback extent. Estimated entries follow the new value; measured ones keep
    /// theirs.
    pub fn set_estimated_size(&mut self, estimated_size: u32) {
        let estimated_size = estimated_size.max(1);
        self.estimated_size = estimated_size;
        for entry in self.entries.values_mut() {
            if entry.is_estimated {
                entry.extent = estimated_size;
            }
        }
    }

    /// Returns the measured extent for `key`, or the estimate.
    pub fn get(&self, key: &K) -> u32 {
        self.get_or(key, self.estimated_size)
    }

    /// Returns the measured extent for `key`, or `fallback`.
    pub fn get_or(&self, key: &K, fallback: u32) -> u32 {
        match self.entries.get(key) {
            Some(entry) if !entry.is_estimated => entry.extent,
            _ => fallback,
        }
    }

    pub fn entry(&self, key: &K) -> Option<SizeEntry> {
        self.entries.get(key).copied()
    }

    pub fn is_measured(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|e| !e.is_estimated)
    }

    /// Ensures `key` has an entry, inserting an estimated one when it has none.
    pub fn touch(&mut self, key: K) {
        let estimated_size = self.estimated_size;
        self.entries.entry(key).or_insert(SizeEntry {
            extent: estimated_size,
            is_estimated: true,
        });
    }

    /// Stores a measured extent and returns the extent previously in effect for `key`.
    ///
    /// Recording the same extent twice changes nothing except marking the entry measured.
    pub fn record(&mut self, key: K, extent: u32) -> u32 {
        let measured = SizeEntry {
            extent,
            is_estimated: false,
        };
        match self.entries.insert(key, measured) {
            Some(prev) if !prev.is_estimated => prev.extent,
            Some(prev) => {
                self.measured += 1;
                prev.extent
            }
            None => {
                self.measured += 1;
                self.estimated_size
            }
        }
    }

    /// Drops the entry for `key`; later lookups fall back to the estimate.
    pub fn invalidate(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(prev) => {
                if !prev.is_estimated {
                    self.measured -= 1;
                }
                true
            }
            None => false,
        }
    }

    /// Keeps only the entries whose key satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let mut measured = 0usize;
        self.entries.retain(|k, e| {
            let kept = keep(k);
            if kept && !e.is_estimated {
                measured += 1;
            }
            kept
        });
        self.measured = measured;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.measured = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries holding a measured (not estimated) extent.
    pub fn measured_len(&self) -> usize {
        self.measured
    }

    /// Iterates over measured entries only.
    pub fn for_each_measured(&self, mut f: impl FnMut(&K, u32)) {
        for (k, e) in self.entries.iter() {
            if !e.is_estimated {
                f(k, e.extent);
            }
        }
    }

    /// Exports measured extents, e.g. to persist them across sessions.
    pub fn export(&self) -> Vec<(K, u32)>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.measured);
        self.for_each_measured(|k, v| out.push((k.clone(), v)));
        out
    }

    /// Replaces the store's contents with previously exported measurements.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.clear();
        for (k, v) in entries {
            self.record(k, v);
        }
    }
}
