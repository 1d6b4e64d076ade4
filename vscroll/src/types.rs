/// Alignment used by `scroll_to_index`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Item start at the viewport start.
    #[default]
    Start,
    Center,
    /// Item end at the viewport end.
    End,
    /// Leave the viewport alone when the item is fully visible, otherwise scroll the least.
    Auto,
}

/// Container geometry reported by the host.
///
/// `main` is the extent along the scroll axis (height for vertical lists), `cross` is the other
/// axis (the width the grid resolves columns from).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

impl Rect {
    pub const fn new(main: u32, cross: u32) -> Self {
        Self { main, cross }
    }
}

/// An inclusive index range: `start_index..=end_index`.
///
/// Empty sequences never produce a range; APIs return `Option<VirtualRange>` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl VirtualRange {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// Output of a range computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// Indexes intersecting the viewport (no overscan).
    pub visible: Option<VirtualRange>,
    /// `visible` widened by overscan on both sides, clamped to the sequence.
    pub rendered: Option<VirtualRange>,
    /// Scrollable extent of the whole sequence, gaps included.
    pub total_extent: u64,
}

impl Window {
    pub const EMPTY: Window = Window {
        visible: None,
        rendered: None,
        total_extent: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.rendered.is_none()
    }
}

/// Output of a grid range computation: the row window plus the item indexes it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridWindow {
    pub rows: Window,
    /// Items covered by `rows.rendered`.
    pub items: Option<VirtualRange>,
    pub columns: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Cumulative offset along the scroll axis.
    pub start: u64,
    /// Extent along the scroll axis (excludes `gap`).
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItemKeyed<K> {
    pub key: K,
    pub index: usize,
    pub start: u64,
    pub size: u32,
}

impl<K> VirtualItemKeyed<K> {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// A rendered grid row and the item indexes it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRow {
    pub row: usize,
    pub start: u64,
    pub size: u32,
    pub items: VirtualRange,
}
