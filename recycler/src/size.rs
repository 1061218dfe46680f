use alloc::vec::Vec;

use crate::DisplayArea;
use crate::fenwick::Fenwick;

/// Per-row heights plus prefix sums over them.
///
/// Every row except the last is followed by `gap`. Heights start out as a uniform estimate and
/// are overwritten in place as rows get measured.
#[derive(Clone, Debug, Default)]
pub struct SizeModel {
    sizes: Vec<u32>,
    measured: Vec<bool>,
    gap: u32,
    sums: Fenwick,
}

impl SizeModel {
    pub fn new(row_count: usize, estimated_height: u32, gap: u32) -> Self {
        let mut model = Self {
            gap,
            ..Self::default()
        };
        model.reset(row_count, estimated_height);
        model
    }

    /// Replaces every entry with `row_count` copies of `estimated_height`.
    pub fn reset(&mut self, row_count: usize, estimated_height: u32) {
        rdebug!(row_count, estimated_height, "SizeModel::reset");
        self.sizes.clear();
        self.sizes.resize(row_count, estimated_height);
        self.measured.clear();
        self.measured.resize(row_count, false);
        self.rebuild();
    }

    /// Overwrites the height of one row. Returns the signed change.
    pub fn update(&mut self, index: usize, height: u32) -> i64 {
        let Some(cur) = self.sizes.get(index).copied() else {
            debug_assert!(
                index < self.sizes.len(),
                "SizeModel::update out of bounds (i={index}, len={})",
                self.sizes.len()
            );
            return 0;
        };
        self.measured[index] = true;
        if cur == height {
            return 0;
        }
        self.sizes[index] = height;
        let delta = height as i64 - cur as i64;
        self.sums.add(index, delta);
        delta
    }

    pub fn set_gap(&mut self, gap: u32) {
        if self.gap == gap {
            return;
        }
        self.gap = gap;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.sums = Fenwick::from_sizes(&self.sizes, self.gap);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.sizes.get(index).copied()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Offset of the top edge of row `index`.
    pub fn start(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    /// Offset of the bottom edge of row `index` (the following gap is not included).
    pub fn end(&self, index: usize) -> u64 {
        let size = self.height(index).unwrap_or(0) as u64;
        self.start(index).saturating_add(size)
    }

    /// Height of all rows and the gaps between them.
    pub fn total(&self) -> u64 {
        self.sums.total()
    }

    /// Index of the last row whose top edge is `<= offset`, or `None` when there are no rows.
    pub fn last_row_starting_at_or_before(&self, offset: u64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(n - 1))
    }

    /// Same result as [`crate::compute_display_area`] over [`Self::sizes`], in `O(log n)`.
    pub fn display_area(&self, min_offset: u64, max_offset: u64) -> DisplayArea {
        let Some(min_index) = self.last_row_starting_at_or_before(min_offset) else {
            return DisplayArea::default();
        };
        let last = self
            .last_row_starting_at_or_before(max_offset.max(min_offset))
            .unwrap_or(min_index)
            .max(min_index);
        DisplayArea {
            min_index,
            count: last - min_index + 1,
            above: self.start(min_index),
            below: self.total().saturating_sub(self.end(last)),
        }
    }
}
