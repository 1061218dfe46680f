/// A platform-agnostic rect where `main` is the scroll axis (height) and `cross` the other one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// Padding between the scroll content edges and the rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Insets {
    pub const fn uniform(v: u32) -> Self {
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }
}

/// What the host reports at the start of a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Scroll offset of the content, measured from the top of the top inset.
    pub offset: u64,
    pub rect: Rect,
}

impl Viewport {
    pub const fn new(offset: u64, height: u32, width: u32) -> Self {
        Self {
            offset,
            rect: Rect {
                main: height,
                cross: width,
            },
        }
    }
}

/// A half-open range `[min_index, max_index)` of row indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub min_index: usize,
    pub max_index: usize, // exclusive
}

impl Window {
    pub const EMPTY: Self = Self {
        min_index: 0,
        max_index: 0,
    };

    pub const fn new(min_index: usize, max_index: usize) -> Self {
        Self {
            min_index,
            max_index,
        }
    }

    pub(crate) const fn empty_at(index: usize) -> Self {
        Self::new(index, index)
    }

    pub fn is_empty(&self) -> bool {
        self.min_index >= self.max_index
    }

    pub fn len(&self) -> usize {
        self.max_index.saturating_sub(self.min_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.min_index && index < self.max_index
    }

    /// Returns `true` when both windows share at least one row.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_index < other.max_index && other.min_index < self.max_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.min_index..self.max_index
    }
}

/// The result of mapping a pair of display offsets onto the row heights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayArea {
    pub min_index: usize,
    /// Number of rows to display, starting at `min_index`. Zero only when there are no rows.
    pub count: usize,
    /// Height of all rows (and their gaps) before `min_index`.
    pub above: u64,
    /// Height of everything after the last displayed row, including the gap that follows it.
    pub below: u64,
}

impl DisplayArea {
    pub fn window(&self) -> Window {
        Window::new(self.min_index, self.min_index + self.count)
    }
}

/// Spacer sizes and placement constants recomputed on every pass.
///
/// The host lays out: a top spacer of `top_spacer`, then the materialized rows separated by
/// `row_gap`, then a bottom spacer of `bottom_spacer`. Insets are already folded into the spacers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentLayout {
    pub top_spacer: u64,
    pub bottom_spacer: u64,
    /// Full scrollable height, insets included.
    pub content_height: u64,
    /// Row the leading spacer is anchored to.
    pub first_row: Option<usize>,
    /// Row the trailing spacer is anchored to.
    pub last_row: Option<usize>,
    pub row_gap: u32,
    pub column_gap: u32,
    pub column_count: usize,
    pub insets: Insets,
    pub width: u32,
}

impl ContentLayout {
    /// Horizontal placement `(x, width)` of a cell in `column`.
    ///
    /// Columns share the width left after insets and gaps; the remainder goes to the last column.
    pub fn column_frame(&self, column: usize) -> (u32, u32) {
        let cols = self.column_count.max(1) as u32;
        let column = (column as u32).min(cols - 1);
        let gaps = self.column_gap.saturating_mul(cols - 1);
        let inner = self
            .width
            .saturating_sub(self.insets.left)
            .saturating_sub(self.insets.right)
            .saturating_sub(gaps);
        let base = inner / cols;
        let x = self
            .insets
            .left
            .saturating_add(column.saturating_mul(base.saturating_add(self.column_gap)));
        let width = if column + 1 == cols {
            inner.saturating_sub(base * (cols - 1))
        } else {
            base
        };
        (x, width)
    }
}

/// What a single layout pass did.
///
/// Each of the four windows is a contiguous (possibly empty) range of row indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    pub window: Window,
    pub area: DisplayArea,
    pub layout: ContentLayout,
    pub removed_above: Window,
    pub removed_below: Window,
    pub added_above: Window,
    pub added_below: Window,
}

impl PassReport {
    pub fn created(&self) -> usize {
        self.added_above.len() + self.added_below.len()
    }

    pub fn destroyed(&self) -> usize {
        self.removed_above.len() + self.removed_below.len()
    }

    /// `true` when the pass neither created nor destroyed a row.
    pub fn is_noop(&self) -> bool {
        self.created() == 0 && self.destroyed() == 0
    }
}
