use crate::{ContentLayout, Row};

/// Opaque token tying a measurement notification to one materialized cell.
///
/// Issued when a row is materialized and revoked before the row's resources return to the pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subscription(pub(crate) u64);

impl Subscription {
    /// The only notification key a recycler subscribes to: the rendered extent of a cell.
    pub const EXTENT_KEY: &'static str = "extent";

    pub fn id(self) -> u64 {
        self.0
    }

    /// Builds the extent notification for this subscription.
    pub fn extent_changed(self, extent: u32) -> Notification<'static> {
        Notification {
            key: Self::EXTENT_KEY,
            subscription: self,
            extent,
        }
    }
}

/// A change reported by the host's measurement mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification<'a> {
    /// What changed. Anything but [`Subscription::EXTENT_KEY`] is rejected.
    pub key: &'a str,
    pub subscription: Subscription,
    /// New height of the observed cell.
    pub extent: u32,
}

/// Where a newly attached row sits relative to the rows already in the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// The row's bottom edge sits one row gap above the top of row `.0`.
    Above(usize),
    /// The row's top edge sits one row gap below the bottom of row `.0`.
    Below(usize),
    /// No other row is materialized; both spacers anchor to this row.
    Sole,
}

/// The view hierarchy a [`crate::Recycler`] materializes rows into.
///
/// A host is only borrowed for the duration of a call; the recycler never stores it.
pub trait Host<C> {
    /// Inserts a freshly bound row. Its cells are already subscribed.
    fn attach_row(&mut self, row: &Row<C>, anchor: Anchor);

    /// Removes a row from the hierarchy. Its cells are already unsubscribed; once this returns
    /// the row's resources go back to the pools.
    fn detach_row(&mut self, row: &Row<C>);

    /// Starts reporting extent changes of `cell` under `subscription`.
    fn subscribe(&mut self, cell: &C, subscription: Subscription) {
        let _ = (cell, subscription);
    }

    /// Stops reporting extent changes of `cell`.
    fn unsubscribe(&mut self, cell: &C, subscription: Subscription) {
        let _ = (cell, subscription);
    }

    /// Receives the spacer sizes and placement constants at the end of every pass.
    fn apply_layout(&mut self, layout: &ContentLayout) {
        let _ = layout;
    }
}
