/// A scroll position expressed relative to an item identity.
///
/// Capturing an anchor before a change and applying it afterwards keeps that item at the same
/// pixel position in the viewport, e.g. when older entries are prepended to a feed or when items
/// above the viewport are re-measured.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Distance from the anchor item's start to the scroll offset.
    pub offset_in_viewport: u64,
}
