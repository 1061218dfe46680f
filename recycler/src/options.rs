use crate::{Error, Insets, Result};

/// Configuration for [`crate::Recycler`].
///
/// All fields are plain values, so the options can be cloned, compared, and (with
/// `feature = "serde"`) persisted. Use [`RecyclerOptions::validate`] or let
/// `Recycler::new`/`Recycler::set_options` reject malformed values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecyclerOptions {
    /// Height assumed for every row until it is measured.
    pub estimated_row_height: u32,
    /// Number of cells per row. Must be at least 1.
    pub column_count: usize,
    /// Vertical space between rows.
    pub row_gap: u32,
    /// Horizontal space between cells of the same row.
    pub column_gap: u32,
    pub insets: Insets,
    /// Extra distance above the viewport to keep materialized, in percent of its height.
    pub overscan_before_percent: u32,
    /// Extra distance below the viewport to keep materialized, in percent of its height.
    pub overscan_after_percent: u32,
    /// Maximum number of idle instances kept per resource kind. `None` keeps everything.
    pub pool_capacity: Option<usize>,
}

impl Default for RecyclerOptions {
    fn default() -> Self {
        Self::new(44)
    }
}

impl RecyclerOptions {
    pub fn new(estimated_row_height: u32) -> Self {
        Self {
            estimated_row_height,
            column_count: 1,
            row_gap: 0,
            column_gap: 0,
            insets: Insets::default(),
            overscan_before_percent: 20,
            overscan_after_percent: 120,
            pool_capacity: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_count == 0 {
            return Err(Error::InvalidColumnCount);
        }
        if self.estimated_row_height == 0 {
            return Err(Error::InvalidEstimatedRowHeight);
        }
        Ok(())
    }

    /// Number of rows needed for `item_count` items.
    pub fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.column_count.max(1))
    }

    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_row_gap(mut self, row_gap: u32) -> Self {
        self.row_gap = row_gap;
        self
    }

    pub fn with_column_gap(mut self, column_gap: u32) -> Self {
        self.column_gap = column_gap;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_overscan_percent(mut self, before: u32, after: u32) -> Self {
        self.overscan_before_percent = before;
        self.overscan_after_percent = after;
        self
    }

    pub fn with_pool_capacity(mut self, pool_capacity: Option<usize>) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }
}
