use alloc::boxed::Box;
use alloc::vec::Vec;

use recycler::{CellHandle, DataSource, Error, Pool, ResourceKind, Result};

type KindFn<T> = Box<dyn Fn(usize, &T) -> ResourceKind + Send + Sync>;
type BindFn<T, C> = Box<dyn Fn(usize, &T, &mut C) + Send + Sync>;

/// A [`DataSource`] over an owned `Vec` of items.
///
/// Every item is bound into a pooled cell by a closure. All items share
/// [`VecSource::DEFAULT_KIND`] unless a kind selector is installed with
/// [`VecSource::with_kind`].
///
/// The item list is immutable once the source is shared with a recycler; to change the data,
/// build a new source and hand it over (see `Controller::set_source`).
pub struct VecSource<T, C> {
    items: Vec<T>,
    kind: Option<KindFn<T>>,
    bind: BindFn<T, C>,
}

impl<T, C> VecSource<T, C> {
    pub const DEFAULT_KIND: ResourceKind = ResourceKind(0);

    pub fn new(items: Vec<T>, bind: impl Fn(usize, &T, &mut C) + Send + Sync + 'static) -> Self {
        Self {
            items,
            kind: None,
            bind: Box::new(bind),
        }
    }

    /// Chooses the resource kind per item, so cells with different layouts are pooled apart.
    pub fn with_kind(
        mut self,
        kind: impl Fn(usize, &T) -> ResourceKind + Send + Sync + 'static,
    ) -> Self {
        self.kind = Some(Box::new(kind));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T, C> DataSource<C> for VecSource<T, C> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn bind_cell(&self, index: usize, pool: &mut Pool<C>) -> Result<CellHandle<C>> {
        let item = self.items.get(index).ok_or(Error::ItemOutOfRange {
            index,
            count: self.items.len(),
        })?;
        let kind = self
            .kind
            .as_ref()
            .map_or(Self::DEFAULT_KIND, |kind| kind(index, item));
        let mut cell = pool.acquire(kind);
        (self.bind)(index, item, &mut cell);
        Ok(CellHandle::new(kind, cell))
    }
}

impl<T: core::fmt::Debug, C> core::fmt::Debug for VecSource<T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VecSource")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
