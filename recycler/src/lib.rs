//! A headless row-recycling engine for variable-height virtualized lists and grids.
//!
//! Given a vertical scroll offset and a viewport size, the engine materializes only the rows near
//! the visible area, recycles cells and row guides through per-kind pools as the viewport moves,
//! and refines row-height estimates from measured cell extents.
//!
//! It does not own any UI objects. A host is expected to:
//! - implement [`Host`] to attach/detach rows and forward measurement subscriptions
//! - implement [`DataSource`] (or use `recycler-adapter`'s `VecSource`) to bind items into cells
//! - call [`Recycler::layout`] whenever the scroll offset, viewport, or data may have changed
//! - report cell extents through [`Recycler::notify`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod host;
mod kind;
mod options;
mod pool;
mod recycler;
mod row;
mod size;
mod source;
mod types;
mod window;


pub use error::{Error, Result};
pub use host::{Anchor, Host, Notification, Subscription};
pub use kind::{KindTag, ResourceKind};
pub use options::RecyclerOptions;
pub use pool::{Factory, Pool, PoolStats};
pub use recycler::Recycler;
pub use row::{Row, RowCell, RowGuide};
pub use size::SizeModel;
pub use source::{CellHandle, DataSource, SharedSource};
pub use types::{ContentLayout, DisplayArea, Insets, PassReport, Rect, Viewport, Window};
pub use window::{compute_display_area, display_bounds, max_scroll_offset};
