// Example: a two-column grid of 20 items scrolled top to bottom, with one cell measured taller
// than the estimate.
use std::sync::Arc;

use recycler::{
    Anchor, CellHandle, ContentLayout, DataSource, Host, Insets, Pool, Recycler, RecyclerOptions,
    ResourceKind, Result, Row, Viewport,
};

const TILE: ResourceKind = ResourceKind(0);

#[derive(Debug)]
struct Tile {
    id: usize,
    caption: String,
}

struct Captions(Vec<String>);

impl DataSource<Tile> for Captions {
    fn count(&self) -> usize {
        self.0.len()
    }

    fn bind_cell(&self, index: usize, pool: &mut Pool<Tile>) -> Result<CellHandle<Tile>> {
        let mut tile = pool.acquire(TILE);
        tile.caption.clone_from(&self.0[index]);
        Ok(CellHandle::new(TILE, tile))
    }
}

struct PrintHost;

impl Host<Tile> for PrintHost {
    fn attach_row(&mut self, row: &Row<Tile>, anchor: Anchor) {
        let tiles: Vec<_> = row
            .cells()
            .iter()
            .map(|c| format!("#{} {}", c.cell().id, c.cell().caption))
            .collect();
        println!(
            "  attach row {} at {} ({:?}): {}",
            row.index(),
            row.guide().top,
            anchor,
            tiles.join(", ")
        );
    }

    fn detach_row(&mut self, row: &Row<Tile>) {
        println!("  detach row {}", row.index());
    }

    fn apply_layout(&mut self, layout: &ContentLayout) {
        println!(
            "  spacers top={} bottom={} content={} columns={:?}",
            layout.top_spacer,
            layout.bottom_spacer,
            layout.content_height,
            (0..layout.column_count)
                .map(|c| layout.column_frame(c))
                .collect::<Vec<_>>()
        );
    }
}

fn main() -> Result<()> {
    let options = RecyclerOptions::new(80)
        .with_column_count(2)
        .with_row_gap(12)
        .with_column_gap(12)
        .with_insets(Insets::uniform(20));

    let mut next_id = 0;
    let mut r = Recycler::new(options, move |_| {
        next_id += 1;
        Tile {
            id: next_id,
            caption: String::new(),
        }
    })?;
    let captions = (0..20).map(|i| format!("Item {i}")).collect();
    r.set_source(Some(Arc::new(Captions(captions))));

    let mut host = PrintHost;
    for offset in [0u64, 150, 300, 600, 0] {
        println!("scroll to {offset}");
        let report = r.layout(&mut host, Viewport::new(offset, 400, 375))?;
        println!(
            "  window={:?} created={} destroyed={}",
            report.window,
            report.created(),
            report.destroyed()
        );

        if offset == 150 {
            // The cell for item 3 rendered taller than estimated.
            let delta = r.on_row_extent_changed(1, 1, 140)?;
            println!("  row 1 measured, height changed by {delta}");
        }
    }

    println!("pool: {:?}", r.cell_pool().stats());
    Ok(())
}
