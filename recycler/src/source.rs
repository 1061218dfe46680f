use alloc::sync::Arc;

use crate::{Pool, ResourceKind, Result};

/// A bound cell together with the kind it was acquired under.
///
/// The kind travels with the cell so it can be returned to the right queue later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellHandle<C> {
    pub kind: ResourceKind,
    pub cell: C,
}

impl<C> CellHandle<C> {
    pub fn new(kind: ResourceKind, cell: C) -> Self {
        Self { kind, cell }
    }
}

/// Supplies items to a [`crate::Recycler`].
///
/// `count` must stay stable between calls to `Recycler::data_changed`/`Recycler::set_source`.
pub trait DataSource<C> {
    /// Total number of items (not rows).
    fn count(&self) -> usize;

    /// Produces a cell for item `index`, usually by acquiring one from `pool` and binding the
    /// item into it. The cell's previous contents must be fully overwritten.
    fn bind_cell(&self, index: usize, pool: &mut Pool<C>) -> Result<CellHandle<C>>;
}

/// How a recycler holds on to its data source: shared with the host, never owned outright.
pub type SharedSource<C> = Arc<dyn DataSource<C> + Send + Sync>;
