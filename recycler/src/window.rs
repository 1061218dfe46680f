//! Offset → row window math.

use crate::{DisplayArea, RecyclerOptions};

/// Maps a pair of display offsets onto `sizes`, a row gap apart.
///
/// - `min_index` is the last row whose top edge is `<= min_offset`.
/// - the window ends at the last row whose top edge is `<= max_offset` (never before
///   `min_index`).
/// - `above` is the top edge of `min_index`; `below` runs from the bottom edge of the last
///   displayed row to the end of the content.
///
/// No gap follows the last row. This is a plain linear scan; [`crate::SizeModel::display_area`]
/// answers the same question from prefix sums.
pub fn compute_display_area(
    min_offset: u64,
    max_offset: u64,
    sizes: &[u32],
    gap: u32,
) -> DisplayArea {
    let n = sizes.len();
    if n == 0 {
        return DisplayArea::default();
    }

    let mut index = 0usize;
    // Top edge of row `index` (or the content end once `index == n`).
    let mut acc = 0u64;
    let mut last_end = 0u64;

    let mut min_index = 0usize;
    let mut above = 0u64;
    while index < n && acc <= min_offset {
        above = acc;
        min_index = index;
        last_end = step(sizes, gap, &mut index, &mut acc);
    }

    let mut max_index = min_index;
    while index < n && acc <= max_offset {
        max_index = index;
        last_end = step(sizes, gap, &mut index, &mut acc);
    }
    let window_end = last_end;

    while index < n {
        step(sizes, gap, &mut index, &mut acc);
    }

    DisplayArea {
        min_index,
        count: max_index - min_index + 1,
        above,
        below: acc.saturating_sub(window_end),
    }
}

/// Consumes row `index` and returns its bottom edge.
fn step(sizes: &[u32], gap: u32, index: &mut usize, acc: &mut u64) -> u64 {
    let end = acc.saturating_add(sizes[*index] as u64);
    *index += 1;
    *acc = if *index < sizes.len() {
        end.saturating_add(gap as u64)
    } else {
        end
    };
    end
}

/// Largest valid scroll offset for the given content and viewport heights.
pub fn max_scroll_offset(content_height: u64, viewport_height: u32) -> u64 {
    content_height.saturating_sub(viewport_height as u64)
}

/// Turns a scroll offset into the `(min, max)` display offsets in row coordinates.
///
/// The offset is clamped to the scrollable range first. The viewport is then extended by
/// `overscan_before_percent` of its height above and reaches `overscan_after_percent` of its
/// height below the offset. When the leading margin would start above the first row, the range
/// is shifted down so it keeps its full span.
pub fn display_bounds(
    options: &RecyclerOptions,
    offset: u64,
    viewport_height: u32,
    rows_height: u64,
) -> (u64, u64) {
    let insets = options.insets;
    let content = (insets.top as u64)
        .saturating_add(rows_height)
        .saturating_add(insets.bottom as u64);
    let offset = offset.min(max_scroll_offset(content, viewport_height));

    let view = viewport_height as u64;
    let before = view * options.overscan_before_percent as u64 / 100;
    let after = view * options.overscan_after_percent as u64 / 100;

    let leading = (insets.top as u64).saturating_add(before);
    if offset < leading {
        return (0, before.saturating_add(after));
    }
    let start = offset - insets.top as u64;
    (start - before, start.saturating_add(after))
}
