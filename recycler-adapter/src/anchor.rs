use recycler::Recycler;

/// A scroll position expressed relative to a row rather than as an absolute offset.
///
/// Row heights change as cells get measured, so an absolute offset drifts. Capturing an anchor
/// before the change and applying it afterwards keeps the anchored row at the same place in the
/// viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowAnchor {
    pub row: usize,
    /// Distance from the row's top edge to the scroll offset.
    pub offset_in_row: u64,
}

/// Captures an anchor for the row at the top of the viewport.
///
/// Returns `None` when the recycler has no rows.
pub fn capture_anchor<C>(recycler: &Recycler<C>, scroll_offset: u64) -> Option<RowAnchor> {
    let row = recycler.row_at_offset(scroll_offset)?;
    let start = recycler.row_start(row)?;
    Some(RowAnchor {
        row,
        offset_in_row: scroll_offset.saturating_sub(start),
    })
}

/// Resolves `anchor` against the current row heights.
///
/// Returns the scroll offset that puts the anchored row back in place, clamped to the scrollable
/// range, or `None` when the row no longer exists.
pub fn resolve_anchor<C>(
    recycler: &Recycler<C>,
    anchor: &RowAnchor,
    viewport_height: u32,
) -> Option<u64> {
    let start = recycler.row_start(anchor.row)?;
    let max = recycler::max_scroll_offset(recycler.content_height(), viewport_height);
    Some(start.saturating_add(anchor.offset_in_row).min(max))
}
