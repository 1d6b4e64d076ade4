/// The viewport as seen by the range calculation.
///
/// Only the virtualizer's viewport setters mutate it; everything else reads a copy. With
/// `feature = "serde"`, it can be persisted to restore a scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    /// Extent along the scroll axis. `0` until the container has been laid out.
    pub viewport_extent: u32,
    /// Extent across the scroll axis (grid width).
    pub cross_extent: u32,
}

impl ViewportState {
    pub fn end(&self) -> u64 {
        self.scroll_offset
            .saturating_add(self.viewport_extent as u64)
    }
}
