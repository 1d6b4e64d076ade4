use alloc::vec::Vec;

/// Per-index extents plus their cumulative start offsets.
///
/// `starts[i] = Σ extents[0..i] + i * gap`, so `starts` is monotonically non-decreasing and
/// offset → index lookups are a binary search. A full rebuild is `O(n)`; changing a single extent
/// refreshes only the suffix that follows it.
#[derive(Clone, Debug, Default)]
pub struct OffsetTable {
    extents: Vec<u32>,
    starts: Vec<u64>,
    gap: u32,
}

impl OffsetTable {
    pub fn new(gap: u32) -> Self {
        Self {
            extents: Vec::new(),
            starts: Vec::new(),
            gap,
        }
    }

    /// Replaces all extents and rebuilds the prefix array.
    pub fn rebuild(&mut self, extents: impl IntoIterator<Item = u32>) {
        self.extents.clear();
        self.extents.extend(extents);
        self.refresh_from(0);
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: u32) {
        if self.gap == gap {
            return;
        }
        self.gap = gap;
        self.refresh_from(0);
    }

    pub fn extent(&self, index: usize) -> Option<u32> {
        self.extents.get(index).copied()
    }

    pub fn start(&self, index: usize) -> Option<u64> {
        self.starts.get(index).copied()
    }

    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Sets one extent. Returns the signed change, `0` when nothing moved.
    pub fn set(&mut self, index: usize, extent: u32) -> i64 {
        let Some(cur) = self.extents.get_mut(index) else {
            return 0;
        };
        if *cur == extent {
            return 0;
        }
        let delta = extent as i64 - *cur as i64;
        *cur = extent;
        self.refresh_from(index + 1);
        delta
    }

    /// Sets several extents and refreshes the prefix array once, from the lowest touched index.
    ///
    /// Out-of-bounds indexes are ignored. Returns the net change of the total extent.
    pub fn set_many(&mut self, updates: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let mut lowest: Option<usize> = None;
        let mut net = 0i64;
        for (index, extent) in updates {
            let Some(cur) = self.extents.get_mut(index) else {
                continue;
            };
            if *cur == extent {
                continue;
            }
            net += extent as i64 - *cur as i64;
            *cur = extent;
            lowest = Some(lowest.map_or(index, |l| l.min(index)));
        }
        if let Some(lowest) = lowest {
            self.refresh_from(lowest + 1);
        }
        net
    }

    /// Total scrollable extent: `starts[n-1] + extents[n-1]`, or `0` when empty.
    pub fn total(&self) -> u64 {
        match (self.starts.last(), self.extents.last()) {
            (Some(&start), Some(&extent)) => start.saturating_add(extent as u64),
            _ => 0,
        }
    }

    /// Index of the item covering `offset`: the largest `i` with `starts[i] <= offset`.
    ///
    /// A gap belongs to the item before it. Offsets past the end map to the last item.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        if self.starts.is_empty() {
            return None;
        }
        let after = self.starts.partition_point(|&s| s <= offset);
        Some(after.saturating_sub(1))
    }

    /// Smallest index `j >= from` with `starts[j] > offset`, or `len()` when there is none.
    pub fn first_starting_after(&self, from: usize, offset: u64) -> usize {
        let from = from.min(self.starts.len());
        from + self.starts[from..].partition_point(|&s| s <= offset)
    }

    fn refresh_from(&mut self, from: usize) {
        let n = self.extents.len();
        self.starts.resize(n, 0);
        if n == 0 {
            return;
        }
        let gap = self.gap as u64;
        let from = from.min(n);
        let mut next = if from == 0 {
            0
        } else {
            self.starts[from - 1]
                .saturating_add(self.extents[from - 1] as u64)
                .saturating_add(gap)
        };
        for i in from..n {
            self.starts[i] = next;
            next = next
                .saturating_add(self.extents[i] as u64)
                .saturating_add(gap);
        }
    }
}
