use alloc::vec::Vec;

use crate::{CellHandle, Subscription};

/// Layout-only placeholder marking where a row sits. Recycled like cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowGuide {
    id: u64,
    /// Top edge in content coordinates (top inset included).
    pub top: u64,
    pub height: u32,
}

impl RowGuide {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            top: 0,
            height: 0,
        }
    }

    /// Stable identity of this guide across reuse.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }

    pub(crate) fn place(&mut self, top: u64, height: u32) {
        self.top = top;
        self.height = height;
    }
}

#[derive(Debug)]
pub struct RowCell<C> {
    pub(crate) handle: CellHandle<C>,
    pub(crate) subscription: Subscription,
    pub(crate) extent: Option<u32>,
}

impl<C> RowCell<C> {
    pub fn cell(&self) -> &C {
        &self.handle.cell
    }

    pub fn cell_mut(&mut self) -> &mut C {
        &mut self.handle.cell
    }

    pub fn handle(&self) -> &CellHandle<C> {
        &self.handle
    }

    pub fn subscription(&self) -> Subscription {
        self.subscription
    }

    /// Last extent reported for this cell, if any.
    pub fn extent(&self) -> Option<u32> {
        self.extent
    }
}

/// A materialized row: one guide plus one cell per column (fewer for a short last row).
#[derive(Debug)]
pub struct Row<C> {
    pub(crate) index: usize,
    pub(crate) first_item: usize,
    pub(crate) guide: RowGuide,
    pub(crate) cells: Vec<RowCell<C>>,
    pub(crate) measured_height: Option<u32>,
}

impl<C> Row<C> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Logical index of the item in column `0`.
    pub fn first_item(&self) -> usize {
        self.first_item
    }

    pub fn guide(&self) -> &RowGuide {
        &self.guide
    }

    pub fn cells(&self) -> &[RowCell<C>] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [RowCell<C>] {
        &mut self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&RowCell<C>> {
        self.cells.get(column)
    }

    /// Tallest extent reported by any of this row's cells.
    pub fn measured_height(&self) -> Option<u32> {
        self.measured_height
    }

    pub(crate) fn refresh_height(&mut self) -> Option<u32> {
        self.measured_height = self.cells.iter().filter_map(|c| c.extent).max();
        self.measured_height
    }
}
