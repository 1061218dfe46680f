//! Host-side helpers for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and only knows about rows, pools and heights. This crate
//! provides small, framework-neutral pieces most hosts end up writing:
//!
//! - [`VecSource`]: a data source over a `Vec` with a bind closure
//! - [`Controller`]: coalesces scroll/resize/measurement events into one layout pass per flush
//! - Row anchoring, so measured rows above the viewport do not move visible content
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod source;

#[cfg(test)]
mod tests;

pub use anchor::{RowAnchor, capture_anchor, resolve_anchor};
pub use controller::Controller;
pub use source::VecSource;
