//! A headless list and grid virtualization engine.
//!
//! For host-side plumbing (scroll controller, measurement observers, keyed render passes), see
//! the `vscroll-adapter` crate.
//!
//! Given a sequence of keyed items, a viewport and per-item extents (estimated until measured),
//! the engine answers which indexes must be rendered and where each one sits along the scroll
//! axis. The core pieces are:
//! - [`SizeStore`]: per-key cache of estimated and measured extents
//! - [`OffsetTable`]: prefix sums over extents with `offset -> index` binary search
//! - [`RangeCalculator`]: visible and overscanned windows
//! - [`ColumnBreakpoints`]: responsive column counts for grids
//! - [`ListVirtualizer`] and [`GridVirtualizer`]: the stateful front ends
//!
//! It is UI-agnostic. The host is expected to provide:
//! - viewport geometry and scroll offset
//! - one stable key per item
//! - measured extents once items have been laid out
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod columns;
mod error;
mod grid;
mod key;
mod list;
mod offsets;
mod options;
mod range;
mod size_store;
mod state;
mod track;
mod types;

#[cfg(test)]
mod tests;

pub use anchor::ScrollAnchor;
pub use columns::{
    ColumnBreakpoints, LG_MIN_WIDTH, MD_MIN_WIDTH, Thresholds, XL_MIN_WIDTH, resolve_columns,
};
pub use error::{ConfigError, check_unique_keys};
pub use grid::GridVirtualizer;
pub use list::ListVirtualizer;
pub use offsets::OffsetTable;
pub use options::{GridOptions, InitialOffset, ListOptions};
pub use range::RangeCalculator;
pub use size_store::{SizeEntry, SizeStore};
pub use state::ViewportState;
pub use types::{
    Align, GridWindow, Rect, VirtualItem, VirtualItemKeyed, VirtualRange, VirtualRow, Window,
};

#[doc(hidden)]
pub use key::{KeyCacheKey, KeyMap, KeySet};
