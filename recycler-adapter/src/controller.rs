use recycler::{
    Host, Notification, PassReport, Recycler, RecyclerOptions, ResourceKind, Result, SharedSource,
    Viewport,
};

use crate::{RowAnchor, capture_anchor, resolve_anchor};

/// A framework-neutral controller that wraps a [`Recycler`] and turns UI events into layout
/// passes.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when the scroll container changes
/// - `on_measured` when a cell reports a new extent
/// - `flush(host)` once per frame (or after a batch of events)
///
/// Events only mark the controller dirty; `flush` runs at most one pass no matter how many
/// events arrived since the last one.
#[derive(Debug)]
pub struct Controller<C> {
    r: Recycler<C>,
    viewport: Viewport,
    dirty: bool,
    keep_anchor: bool,
}

impl<C> Controller<C> {
    pub fn new(
        options: RecyclerOptions,
        cell_factory: impl FnMut(ResourceKind) -> C + Send + 'static,
    ) -> Result<Self> {
        Ok(Self::from_recycler(Recycler::new(options, cell_factory)?))
    }

    pub fn from_recycler(r: Recycler<C>) -> Self {
        Self {
            r,
            viewport: Viewport::default(),
            dirty: true,
            keep_anchor: false,
        }
    }

    /// Keeps the row at the top of the viewport in place while rows above it get measured.
    pub fn with_scroll_anchoring(mut self, enabled: bool) -> Self {
        self.keep_anchor = enabled;
        self
    }

    pub fn recycler(&self) -> &Recycler<C> {
        &self.r
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<C> {
        self.dirty = true;
        &mut self.r
    }

    pub fn into_recycler(self) -> Recycler<C> {
        self.r
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scroll offset the host should apply to its scroll container.
    pub fn scroll_offset(&self) -> u64 {
        self.viewport.offset
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, offset: u64) {
        if self.viewport.offset != offset {
            self.viewport.offset = offset;
            self.dirty = true;
        }
    }

    /// Call this when the scroll container changes size.
    pub fn on_resize(&mut self, height: u32, width: u32) {
        if self.viewport.rect.main != height || self.viewport.rect.cross != width {
            self.viewport.rect.main = height;
            self.viewport.rect.cross = width;
            self.dirty = true;
        }
    }

    /// Forwards a measurement notification.
    ///
    /// Returns the change applied to the owning row's height.
    pub fn on_measured(&mut self, notification: &Notification<'_>) -> Result<i64> {
        let anchor = self.anchor();
        let delta = self.r.notify(notification)?;
        self.after_measure(anchor, delta);
        Ok(delta)
    }

    /// Forwards a measurement for the cell at `column` of the `ordinal`-th materialized row.
    pub fn on_row_extent_changed(
        &mut self,
        ordinal: usize,
        column: usize,
        extent: u32,
    ) -> Result<i64> {
        let anchor = self.anchor();
        let delta = self.r.on_row_extent_changed(ordinal, column, extent)?;
        self.after_measure(anchor, delta);
        Ok(delta)
    }

    fn anchor(&self) -> Option<RowAnchor> {
        if self.keep_anchor {
            capture_anchor(&self.r, self.viewport.offset)
        } else {
            None
        }
    }

    fn after_measure(&mut self, anchor: Option<RowAnchor>, delta: i64) {
        if delta == 0 {
            return;
        }
        self.dirty = true;
        if let Some(offset) =
            anchor.and_then(|a| resolve_anchor(&self.r, &a, self.viewport.rect.main))
        {
            self.viewport.offset = offset;
        }
    }

    /// Replaces the data source. Every materialized row is rebound on the next flush.
    pub fn set_source(&mut self, source: Option<SharedSource<C>>) {
        self.r.set_source(source);
        self.dirty = true;
    }

    /// Call this after the current source's items changed.
    pub fn data_changed(&mut self) {
        self.r.data_changed();
        self.dirty = true;
    }

    pub fn set_options(&mut self, options: RecyclerOptions) -> Result<()> {
        self.r.set_options(options)?;
        self.dirty = true;
        Ok(())
    }

    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions)) -> Result<()> {
        self.r.update_options(f)?;
        self.dirty = true;
        Ok(())
    }

    /// Scrolls so row `index` starts at the top of the viewport (as far as the content allows).
    ///
    /// Returns the applied (clamped) offset, or `None` when the row does not exist.
    pub fn scroll_to_row(&mut self, index: usize) -> Option<u64> {
        let offset = resolve_anchor(
            &self.r,
            &RowAnchor {
                row: index,
                offset_in_row: 0,
            },
            self.viewport.rect.main,
        )?;
        self.on_scroll(offset);
        Some(offset)
    }

    /// Runs a layout pass if anything changed since the last one (or the last pass failed).
    pub fn flush<H: Host<C>>(&mut self, host: &mut H) -> Result<Option<PassReport>> {
        if !self.dirty {
            return Ok(None);
        }
        // A failed pass stays dirty so the next flush retries it.
        let report = self.r.layout(host, self.viewport)?;
        self.dirty = false;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "recycler_adapter",
            offset = self.viewport.offset,
            created = report.created(),
            destroyed = report.destroyed(),
            "Controller::flush"
        );
        Ok(Some(report))
    }
}
