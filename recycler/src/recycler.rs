use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::window::display_bounds;
use crate::{
    Anchor, ContentLayout, DataSource, DisplayArea, Error, Host, Notification, PassReport, Pool,
    RecyclerOptions, ResourceKind, Result, Row, RowCell, RowGuide, SharedSource, SizeModel,
    Subscription, Viewport, Window,
};

/// A windowed row renderer.
///
/// The recycler keeps only the rows near the viewport materialized. Each call to
/// [`Recycler::layout`] maps the scroll offset to a row window, diffs it against the rows
/// currently materialized, and creates/destroys rows at both ends through the host. Cells and row
/// guides are recycled through per-kind pools, and measured cell extents flow back into the
/// row heights via [`Recycler::notify`].
///
/// The recycler owns its size model, pools and rows. The data source is shared with the host and
/// the host itself is only borrowed per call.
pub struct Recycler<C> {
    options: RecyclerOptions,
    source: Option<SharedSource<C>>,
    item_count: usize,
    sizes: SizeModel,

    window: Window,
    rows: VecDeque<Row<C>>,
    cells: Pool<C>,
    guides: Pool<RowGuide>,
    next_subscription: u64,
    // Materialized rows no longer match the data set and must be rebuilt on the next pass.
    stale: bool,
    layout: ContentLayout,
}

impl<C> Recycler<C> {
    /// Creates a recycler with no data source.
    ///
    /// `cell_factory` builds a new cell whenever the pool has none left for a kind.
    pub fn new(
        options: RecyclerOptions,
        cell_factory: impl FnMut(ResourceKind) -> C + Send + 'static,
    ) -> Result<Self> {
        options.validate()?;
        rdebug!(
            estimated_row_height = options.estimated_row_height,
            column_count = options.column_count,
            row_gap = options.row_gap,
            "Recycler::new"
        );

        let mut cells = Pool::new(cell_factory);
        cells.set_capacity(options.pool_capacity);
        let mut next_guide = 0u64;
        let mut guides = Pool::new(move |_| {
            next_guide += 1;
            RowGuide::new(next_guide)
        });
        guides.set_capacity(options.pool_capacity);

        Ok(Self {
            sizes: SizeModel::new(0, options.estimated_row_height, options.row_gap),
            options,
            source: None,
            item_count: 0,
            window: Window::EMPTY,
            rows: VecDeque::new(),
            cells,
            guides,
            next_subscription: 0,
            stale: false,
            layout: ContentLayout::default(),
        })
    }

    pub fn options(&self) -> &RecyclerOptions {
        &self.options
    }

    /// Replaces the configuration.
    ///
    /// A new column count or row estimate resets every row height (and, for the column count,
    /// rebuilds all rows on the next pass). Gaps, insets and overscan only change placement.
    pub fn set_options(&mut self, options: RecyclerOptions) -> Result<()> {
        options.validate()?;
        let prev = core::mem::replace(&mut self.options, options);
        rdebug!(
            column_count = self.options.column_count,
            estimated_row_height = self.options.estimated_row_height,
            row_gap = self.options.row_gap,
            "Recycler::set_options"
        );

        if prev.pool_capacity != self.options.pool_capacity {
            self.cells.set_capacity(self.options.pool_capacity);
            self.guides.set_capacity(self.options.pool_capacity);
        }
        self.sizes.set_gap(self.options.row_gap);

        if prev.column_count != self.options.column_count {
            self.reset_sizes();
            self.stale = true;
        } else if prev.estimated_row_height != self.options.estimated_row_height {
            self.reset_sizes();
        }
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions)) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Swaps the data source. `None` makes every following pass a no-op.
    pub fn set_source(&mut self, source: Option<SharedSource<C>>) {
        self.source = source;
        self.data_changed();
    }

    pub fn source(&self) -> Option<&SharedSource<C>> {
        self.source.as_ref()
    }

    /// Re-reads the item count, resets all row heights to the estimate, and schedules every
    /// materialized row to be rebound on the next pass.
    pub fn data_changed(&mut self) {
        self.item_count = self.source.as_ref().map_or(0, |s| s.count());
        self.reset_sizes();
        self.stale = true;
    }

    fn reset_sizes(&mut self) {
        let rows = self.options.row_count(self.item_count);
        self.sizes.reset(rows, self.options.estimated_row_height);
    }

    /// Runs one layout pass for `viewport`.
    ///
    /// On error (a failed bind) the rows created so far stay materialized and [`Self::window`]
    /// describes them; the next pass picks up from there.
    pub fn layout<H: Host<C>>(&mut self, host: &mut H, viewport: Viewport) -> Result<PassReport> {
        let mut report = PassReport::default();

        if self.stale {
            let old = self.window;
            self.release_all(host);
            report.removed_below = old;
            self.stale = false;
        }

        let Some(source) = self.source.clone() else {
            report.window = self.window;
            return Ok(report);
        };

        let (min_offset, max_offset) = display_bounds(
            &self.options,
            viewport.offset,
            viewport.rect.main,
            self.sizes.total(),
        );
        let area = self.sizes.display_area(min_offset, max_offset);
        rtrace!(
            offset = viewport.offset,
            min_offset,
            max_offset,
            min_index = area.min_index,
            count = area.count,
            "Recycler::layout"
        );

        let result = self.reconcile(host, &*source, area.window(), &mut report);

        self.refresh_guides();
        self.layout = self.content_layout(viewport.rect.cross);
        host.apply_layout(&self.layout);
        result?;

        report.window = self.window;
        report.area = area;
        report.layout = self.layout;
        rtrace!(
            created = report.created(),
            destroyed = report.destroyed(),
            "Recycler::layout done"
        );
        Ok(report)
    }

    fn reconcile<H: Host<C>>(
        &mut self,
        host: &mut H,
        source: &dyn DataSource<C>,
        desired: Window,
        report: &mut PassReport,
    ) -> Result<()> {
        let cur = self.window;
        if !cur.is_empty() && !cur.overlaps(&desired) {
            if desired.min_index >= cur.max_index {
                report.removed_above = cur;
            } else {
                report.removed_below = cur;
            }
            self.release_all(host);
        }
        if self.window.is_empty() {
            self.window = Window::empty_at(desired.min_index);
        }

        // Leading edge.
        let cur = self.window;
        if cur.min_index < desired.min_index {
            self.release_front(host, desired.min_index - cur.min_index);
            report.removed_above = Window::new(cur.min_index, desired.min_index);
        } else if cur.min_index > desired.min_index {
            for index in (desired.min_index..cur.min_index).rev() {
                let anchor = match self.rows.front() {
                    Some(top) => Anchor::Above(top.index),
                    None => Anchor::Sole,
                };
                let row = self.materialize(host, source, index, anchor)?;
                self.rows.push_front(row);
                self.window.min_index = index;
            }
            report.added_above = Window::new(desired.min_index, cur.min_index);
        }

        // Trailing edge.
        let cur = self.window;
        if cur.max_index < desired.max_index {
            for index in cur.max_index..desired.max_index {
                let anchor = match self.rows.back() {
                    Some(bottom) => Anchor::Below(bottom.index),
                    None => Anchor::Sole,
                };
                let row = self.materialize(host, source, index, anchor)?;
                self.rows.push_back(row);
                self.window.max_index = index + 1;
            }
            report.added_below = Window::new(cur.max_index, desired.max_index);
        } else if cur.max_index > desired.max_index {
            self.release_back(host, cur.max_index - desired.max_index);
            report.removed_below = Window::new(desired.max_index, cur.max_index);
        }

        debug_assert_eq!(self.window, desired, "window diverged from the desired range");
        debug_assert_eq!(self.rows.len(), self.window.len(), "rows out of sync with window");
        Ok(())
    }

    /// Binds every cell of row `index`, subscribes them, then attaches the row.
    fn materialize<H: Host<C>>(
        &mut self,
        host: &mut H,
        source: &dyn DataSource<C>,
        index: usize,
        anchor: Anchor,
    ) -> Result<Row<C>> {
        let columns = self.options.column_count;
        let first_item = index * columns;
        let cell_count = columns.min(self.item_count.saturating_sub(first_item));
        let available = source.count();

        let mut bound = Vec::with_capacity(cell_count);
        for item in first_item..first_item + cell_count {
            let result = if item < available {
                source.bind_cell(item, &mut self.cells)
            } else {
                rwarn!(
                    item,
                    available,
                    reported = self.item_count,
                    "data source shrank without a change notification"
                );
                Err(Error::ItemOutOfRange {
                    index: item,
                    count: available,
                })
            };
            match result {
                Ok(handle) => bound.push(handle),
                Err(err) => {
                    for handle in bound {
                        self.cells.release(handle.kind, handle.cell);
                    }
                    return Err(err);
                }
            }
        }

        let mut guide = self.guides.acquire(ResourceKind::GUIDE);
        guide.place(
            (self.options.insets.top as u64).saturating_add(self.sizes.start(index)),
            self.sizes.height(index).unwrap_or(0),
        );

        let mut cells = Vec::with_capacity(bound.len());
        for handle in bound {
            let subscription = Subscription(self.next_subscription);
            self.next_subscription += 1;
            host.subscribe(&handle.cell, subscription);
            cells.push(RowCell {
                handle,
                subscription,
                extent: None,
            });
        }

        let row = Row {
            index,
            first_item,
            guide,
            cells,
            measured_height: None,
        };
        host.attach_row(&row, anchor);
        Ok(row)
    }

    /// Unsubscribes and detaches `row`, then returns its guide and cells to the pools.
    fn release_row<H: Host<C>>(&mut self, host: &mut H, row: Row<C>) {
        for cell in &row.cells {
            host.unsubscribe(&cell.handle.cell, cell.subscription);
        }
        host.detach_row(&row);

        let Row { guide, cells, .. } = row;
        for cell in cells {
            self.cells.release(cell.handle.kind, cell.handle.cell);
        }
        self.guides.release(ResourceKind::GUIDE, guide);
    }

    fn release_front<H: Host<C>>(&mut self, host: &mut H, count: usize) {
        for _ in 0..count {
            let Some(row) = self.rows.pop_front() else {
                break;
            };
            self.release_row(host, row);
        }
        self.window.min_index = (self.window.min_index + count).min(self.window.max_index);
    }

    fn release_back<H: Host<C>>(&mut self, host: &mut H, count: usize) {
        let keep = self.rows.len().saturating_sub(count);
        let tail = self.rows.split_off(keep);
        for row in tail {
            self.release_row(host, row);
        }
        self.window.max_index = self
            .window
            .max_index
            .saturating_sub(count)
            .max(self.window.min_index);
    }

    fn release_all<H: Host<C>>(&mut self, host: &mut H) {
        let count = self.rows.len();
        self.release_front(host, count);
        self.window = Window::empty_at(self.window.min_index);
    }

    /// Dematerializes every row and returns all resources to the pools.
    pub fn clear<H: Host<C>>(&mut self, host: &mut H) {
        self.release_all(host);
        self.window = Window::EMPTY;
    }

    fn refresh_guides(&mut self) {
        let top = self.options.insets.top as u64;
        let sizes = &self.sizes;
        for row in self.rows.iter_mut() {
            row.guide.place(
                top.saturating_add(sizes.start(row.index)),
                sizes.height(row.index).unwrap_or(0),
            );
        }
    }

    fn content_layout(&self, width: u32) -> ContentLayout {
        let insets = self.options.insets;
        let total = self.sizes.total();
        let (above, below, first_row, last_row) = if self.window.is_empty() {
            (total, 0, None, None)
        } else {
            let first = self.window.min_index;
            let last = self.window.max_index - 1;
            (
                self.sizes.start(first),
                total.saturating_sub(self.sizes.end(last)),
                Some(first),
                Some(last),
            )
        };
        ContentLayout {
            top_spacer: above.saturating_add(insets.top as u64),
            bottom_spacer: below.saturating_add(insets.bottom as u64),
            content_height: self.content_height(),
            first_row,
            last_row,
            row_gap: self.options.row_gap,
            column_gap: self.options.column_gap,
            column_count: self.options.column_count,
            insets,
            width,
        }
    }

    /// Handles a notification from the host's measurement mechanism.
    ///
    /// Returns the change applied to the owning row's height. Notifications for any key other
    /// than [`Subscription::EXTENT_KEY`] are a contract violation and fail immediately.
    pub fn notify(&mut self, notification: &Notification<'_>) -> Result<i64> {
        if notification.key != Subscription::EXTENT_KEY {
            rwarn!(key = notification.key, "unsupported notification key");
            return Err(Error::UnsupportedNotification {
                key: notification.key.into(),
            });
        }
        let Some((ordinal, column)) = self.locate(notification.subscription) else {
            rwarn!(
                subscription = notification.subscription.id(),
                "notification for an unknown subscription"
            );
            return Err(Error::UnknownSubscription(notification.subscription));
        };
        Ok(self.apply_extent(ordinal, column, notification.extent))
    }

    /// Records a new extent for the cell at `column` of the `ordinal`-th materialized row.
    pub fn on_row_extent_changed(
        &mut self,
        ordinal: usize,
        column: usize,
        extent: u32,
    ) -> Result<i64> {
        let exists = self
            .rows
            .get(ordinal)
            .is_some_and(|row| column < row.cells.len());
        if !exists {
            return Err(Error::NotMaterialized { ordinal, column });
        }
        Ok(self.apply_extent(ordinal, column, extent))
    }

    fn locate(&self, subscription: Subscription) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(ordinal, row)| {
            row.cells
                .iter()
                .position(|c| c.subscription == subscription)
                .map(|column| (ordinal, column))
        })
    }

    fn apply_extent(&mut self, ordinal: usize, column: usize, extent: u32) -> i64 {
        let index = self.window.min_index + ordinal;
        let row = &mut self.rows[ordinal];
        debug_assert_eq!(row.index, index, "row ordinal does not match the window");
        row.cells[column].extent = Some(extent);
        let Some(height) = row.refresh_height() else {
            return 0;
        };
        if self.stale || index >= self.sizes.len() {
            // The row belongs to a data set that has since been replaced.
            return 0;
        }
        let delta = self.sizes.update(index, height);
        rtrace!(index, height, delta, "row height updated");
        delta
    }

    /// The materialized row range.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Materialized rows in ascending index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &Row<C>> + DoubleEndedIterator {
        self.rows.iter()
    }

    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Row<C>> + DoubleEndedIterator {
        self.rows.iter_mut()
    }

    /// The materialized row with logical index `index`.
    pub fn row(&self, index: usize) -> Option<&Row<C>> {
        if !self.window.contains(index) {
            return None;
        }
        self.rows.get(index - self.window.min_index)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn row_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn sizes(&self) -> &SizeModel {
        &self.sizes
    }

    /// Height of all rows plus the top and bottom insets.
    pub fn content_height(&self) -> u64 {
        let insets = self.options.insets;
        (insets.top as u64)
            .saturating_add(self.sizes.total())
            .saturating_add(insets.bottom as u64)
    }

    /// Height of all rows and the gaps between them, insets excluded.
    pub fn total_height(&self) -> u64 {
        self.sizes.total()
    }

    /// Top edge of row `index` in content coordinates.
    pub fn row_start(&self, index: usize) -> Option<u64> {
        (index < self.sizes.len())
            .then(|| (self.options.insets.top as u64).saturating_add(self.sizes.start(index)))
    }

    /// Bottom edge of row `index` in content coordinates (the following gap is not included).
    pub fn row_end(&self, index: usize) -> Option<u64> {
        (index < self.sizes.len())
            .then(|| (self.options.insets.top as u64).saturating_add(self.sizes.end(index)))
    }

    /// Row under content offset `offset`; the row above when `offset` falls in a gap, the first
    /// row inside the top inset.
    pub fn row_at_offset(&self, offset: u64) -> Option<usize> {
        let offset = offset.saturating_sub(self.options.insets.top as u64);
        self.sizes.last_row_starting_at_or_before(offset)
    }

    /// Current height of row `index`, measured or estimated.
    pub fn row_height(&self, index: usize) -> Option<u32> {
        self.sizes.height(index)
    }

    /// Materialized rows paired with their top edge in content coordinates.
    pub fn rows_with_offsets(&self) -> impl Iterator<Item = (&Row<C>, u64)> {
        let top = self.options.insets.top as u64;
        self.rows
            .iter()
            .map(move |row| (row, top.saturating_add(self.sizes.start(row.index))))
    }

    /// Window and spacers that a pass at `viewport` would produce, without touching any row.
    pub fn display_area_for(&self, viewport: Viewport) -> DisplayArea {
        let (min_offset, max_offset) = display_bounds(
            &self.options,
            viewport.offset,
            viewport.rect.main,
            self.sizes.total(),
        );
        self.sizes.display_area(min_offset, max_offset)
    }

    /// Spacers and placement constants from the most recent pass.
    pub fn content_layout_snapshot(&self) -> ContentLayout {
        self.layout
    }

    /// `true` when the materialized rows predate the current data set.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn cell_pool(&self) -> &Pool<C> {
        &self.cells
    }

    pub fn cell_pool_mut(&mut self) -> &mut Pool<C> {
        &mut self.cells
    }

    pub fn guide_pool(&self) -> &Pool<RowGuide> {
        &self.guides
    }
}

impl<C> core::fmt::Debug for Recycler<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("options", &self.options)
            .field("has_source", &self.source.is_some())
            .field("item_count", &self.item_count)
            .field("row_count", &self.sizes.len())
            .field("window", &self.window)
            .field("stale", &self.stale)
            .field("cells", &self.cells)
            .field("guides", &self.guides)
            .finish_non_exhaustive()
    }
}
