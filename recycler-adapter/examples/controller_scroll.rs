// Example: driving a recycler from UI-style events through the controller.
use std::sync::Arc;

use recycler::{Anchor, Host, RecyclerOptions, ResourceKind, Row};
use recycler_adapter::{Controller, VecSource};

const TEXT: ResourceKind = ResourceKind(0);
const HEADER: ResourceKind = ResourceKind(1);

#[derive(Debug, Default)]
struct Label(String);

#[derive(Default)]
struct CountingHost {
    attached: usize,
    detached: usize,
}

impl Host<Label> for CountingHost {
    fn attach_row(&mut self, _row: &Row<Label>, _anchor: Anchor) {
        self.attached += 1;
    }

    fn detach_row(&mut self, _row: &Row<Label>) {
        self.detached += 1;
    }
}

fn main() -> recycler::Result<()> {
    let items: Vec<String> = (0..1_000).map(|i| format!("message {i}")).collect();
    let source = VecSource::new(items, |_, item: &String, cell: &mut Label| {
        cell.0.clone_from(item);
    })
    .with_kind(|i, _| if i % 50 == 0 { HEADER } else { TEXT });

    let mut c = Controller::new(RecyclerOptions::new(24).with_row_gap(4), |_| Label::default())?
        .with_scroll_anchoring(true);
    c.set_source(Some(Arc::new(source)));
    c.on_resize(600, 320);

    let mut host = CountingHost::default();
    c.flush(&mut host)?;

    // A burst of wheel events between two frames costs one pass.
    for offset in (0..2_000).step_by(100) {
        c.on_scroll(offset);
    }
    if let Some(report) = c.flush(&mut host)? {
        println!("window after burst: {:?}", report.window);
    }

    // The first visible rows render taller than estimated.
    for ordinal in 0..4 {
        c.on_row_extent_changed(ordinal, 0, 40)?;
    }
    c.flush(&mut host)?;
    println!("offset after anchoring: {}", c.scroll_offset());

    if let Some(offset) = c.scroll_to_row(999) {
        c.flush(&mut host)?;
        println!("scrolled to the end at {offset}");
    }

    println!(
        "attached={} detached={} pool={:?}",
        host.attached,
        host.detached,
        c.recycler().cell_pool().stats()
    );
    Ok(())
}
