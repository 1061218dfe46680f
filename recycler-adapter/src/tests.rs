use crate::*;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use core::sync::atomic::{AtomicUsize, Ordering};

use recycler::{
    Anchor, CellHandle, ContentLayout, DataSource, Error, Host, Pool, RecyclerOptions,
    ResourceKind, Result, Row, Window,
};

const EVEN: ResourceKind = ResourceKind(10);
const ODD: ResourceKind = ResourceKind(11);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Label {
    kind: ResourceKind,
    text: String,
}

fn label_factory(kind: ResourceKind) -> Label {
    Label {
        kind,
        text: String::new(),
    }
}

fn words(n: usize, prefix: &str) -> VecSource<String, Label> {
    let items = (0..n).map(|i| format!("{prefix}{i}")).collect();
    VecSource::new(items, |_, item: &String, cell: &mut Label| {
        cell.text.clone_from(item);
    })
}

#[derive(Debug, Default)]
struct TextHost {
    rows: BTreeMap<usize, Vec<String>>,
    passes: usize,
}

impl Host<Label> for TextHost {
    fn attach_row(&mut self, row: &Row<Label>, _anchor: Anchor) {
        let texts = row.cells().iter().map(|c| c.cell().text.clone()).collect();
        assert!(self.rows.insert(row.index(), texts).is_none());
    }

    fn detach_row(&mut self, row: &Row<Label>) {
        assert!(self.rows.remove(&row.index()).is_some());
    }

    fn apply_layout(&mut self, _layout: &ContentLayout) {
        self.passes += 1;
    }
}

/// Reports however many items `count` says, regardless of what it reported before.
struct Shrinking {
    count: AtomicUsize,
}

impl DataSource<Label> for Shrinking {
    fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    fn bind_cell(&self, index: usize, pool: &mut Pool<Label>) -> Result<CellHandle<Label>> {
        let mut cell = pool.acquire(EVEN);
        cell.text = format!("{index}");
        Ok(CellHandle::new(EVEN, cell))
    }
}

fn controller(items: usize) -> Controller<Label> {
    let mut c = Controller::new(RecyclerOptions::new(20), label_factory).unwrap();
    c.set_source(Some(Arc::new(words(items, "item "))));
    c.on_resize(100, 200);
    c
}

#[test]
fn vec_source_binds_items_into_pooled_cells() {
    let source = words(4, "w").with_kind(|i, _| if i % 2 == 0 { EVEN } else { ODD });
    let mut pool = Pool::new(label_factory);

    let a = source.bind_cell(0, &mut pool).unwrap();
    assert_eq!(a.kind, EVEN);
    assert_eq!(a.cell.text, "w0");
    let b = source.bind_cell(3, &mut pool).unwrap();
    assert_eq!(b.kind, ODD);
    assert_eq!(b.cell.kind, ODD);

    // A released cell is rebound in place.
    pool.release(a.kind, a.cell);
    let c = source.bind_cell(2, &mut pool).unwrap();
    assert_eq!(c.cell.text, "w2");
    assert_eq!(pool.stats().reused, 1);

    assert_eq!(
        source.bind_cell(4, &mut pool).unwrap_err(),
        Error::ItemOutOfRange { index: 4, count: 4 }
    );
    assert_eq!(source.len(), 4);
    assert_eq!(source.get(1).map(String::as_str), Some("w1"));
}

#[test]
fn default_kind_is_shared_by_all_items() {
    let source = words(3, "x");
    let mut pool = Pool::new(label_factory);
    let h = source.bind_cell(1, &mut pool).unwrap();
    assert_eq!(h.kind, VecSource::<String, Label>::DEFAULT_KIND);
}

#[test]
fn controller_coalesces_events_into_one_pass() {
    let mut c = controller(50);
    let mut host = TextHost::default();

    // 50 rows of 20 in a 100-high viewport: [0, 140] → rows 0..=7.
    let report = c.flush(&mut host).unwrap().unwrap();
    assert_eq!(report.window, Window::new(0, 8));
    assert_eq!(host.rows[&3], ["item 3"]);
    assert!(c.flush(&mut host).unwrap().is_none());

    for ordinal in 0..3 {
        let sub = c.recycler().rows().nth(ordinal).unwrap().cells()[0].subscription();
        assert_eq!(c.on_measured(&sub.extent_changed(30)).unwrap(), 10);
    }
    assert!(c.is_dirty());
    let passes = host.passes;
    c.flush(&mut host).unwrap();
    assert_eq!(host.passes, passes + 1);
    assert!(!c.is_dirty());

    // Unchanged extents do not schedule a pass.
    c.on_row_extent_changed(0, 0, 30).unwrap();
    assert!(c.flush(&mut host).unwrap().is_none());

    // Same offset twice is one event.
    c.on_scroll(0);
    assert!(!c.is_dirty());
}

#[test]
fn scroll_anchoring_keeps_the_top_row_in_place() {
    for anchoring in [false, true] {
        let mut c = controller(50).with_scroll_anchoring(anchoring);
        let mut host = TextHost::default();
        assert_eq!(c.scroll_to_row(10), Some(200));
        let report = c.flush(&mut host).unwrap().unwrap();
        // [180, 320] → rows 9..=16
        assert_eq!(report.window, Window::new(9, 17));

        // Row 9 sits above the viewport and grows by 30.
        assert_eq!(c.on_row_extent_changed(0, 0, 50).unwrap(), 30);
        let expected = if anchoring { 230 } else { 200 };
        assert_eq!(c.scroll_offset(), expected);
        assert_eq!(
            capture_anchor(c.recycler(), c.scroll_offset()).map(|a| a.row),
            Some(if anchoring { 10 } else { 9 })
        );
    }
}

#[test]
fn scroll_to_row_clamps_to_content() {
    let mut c = controller(50);
    // 1000 high, 100-high viewport.
    assert_eq!(c.scroll_to_row(49), Some(900));
    assert_eq!(c.scroll_to_row(50), None);
    assert_eq!(c.scroll_offset(), 900);
}

#[test]
fn replacing_the_source_rebinds_visible_rows() {
    let mut c = controller(50);
    let mut host = TextHost::default();
    c.flush(&mut host).unwrap();
    assert_eq!(host.rows[&0], ["item 0"]);

    c.set_source(Some(Arc::new(words(50, "new "))));
    let report = c.flush(&mut host).unwrap().unwrap();
    assert_eq!(report.removed_below, Window::new(0, 8));
    assert_eq!(report.added_below, Window::new(0, 8));
    assert_eq!(host.rows[&0], ["new 0"]);
    assert_eq!(host.rows.len(), 8);

    // Same number of cells, so every one came back from the pool.
    assert_eq!(c.recycler().cell_pool().stats().created, 8);
}

#[test]
fn grid_controller_groups_items_per_row() {
    let mut c = Controller::new(
        RecyclerOptions::new(20).with_column_count(3),
        label_factory,
    )
    .unwrap();
    c.set_source(Some(Arc::new(words(7, ""))));
    c.on_resize(400, 300);
    let mut host = TextHost::default();
    c.flush(&mut host).unwrap();

    assert_eq!(c.recycler().row_count(), 3);
    assert_eq!(host.rows[&0], ["0", "1", "2"]);
    assert_eq!(host.rows[&2], ["6"]);
}

#[test]
fn invalid_options_are_rejected_without_side_effects() {
    let mut c = controller(10);
    let mut host = TextHost::default();
    c.flush(&mut host).unwrap();
    assert!(c.update_options(|o| o.estimated_row_height = 0).is_err());
    assert!(!c.is_dirty());
    assert_eq!(c.recycler().options().estimated_row_height, 20);
}

#[test]
fn failed_flush_is_retried() {
    let source = Arc::new(Shrinking {
        count: AtomicUsize::new(50),
    });
    let mut c = Controller::new(RecyclerOptions::new(20), label_factory).unwrap();
    c.set_source(Some(source.clone()));
    c.on_resize(100, 200);
    source.count.store(3, Ordering::Relaxed);

    let mut host = TextHost::default();
    assert_eq!(
        c.flush(&mut host).unwrap_err(),
        Error::ItemOutOfRange { index: 3, count: 3 }
    );
    assert_eq!(c.recycler().window(), Window::new(0, 3));
    assert!(c.is_dirty());

    let passes = host.passes;
    assert!(c.flush(&mut host).is_err());
    assert_eq!(host.passes, passes + 1);
    assert!(c.is_dirty());

    c.data_changed();
    let report = c.flush(&mut host).unwrap().unwrap();
    assert_eq!(report.window, Window::new(0, 3));
    assert!(!c.is_dirty());
    assert_eq!(host.rows.len(), 3);
}
