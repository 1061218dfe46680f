#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KindMap<V> = HashMap<ResourceKind, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KindMap<V> = BTreeMap<ResourceKind, V>;

/// A stable tag identifying one kind of reusable resource (a cell type, or the row guide).
///
/// Kinds are declared up front by the binding layer; instances are only ever reused for the
/// kind they were released under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceKind(pub u32);

impl ResourceKind {
    /// The kind every row guide is pooled under.
    pub const GUIDE: Self = Self(u32::MAX);
}

/// Marker types that name a [`ResourceKind`], for typed pool access.
///
/// ```
/// use recycler::{KindTag, ResourceKind};
///
/// struct CardCell;
/// impl KindTag for CardCell {
///     const KIND: ResourceKind = ResourceKind(1);
/// }
/// ```
pub trait KindTag {
    const KIND: ResourceKind;
}
