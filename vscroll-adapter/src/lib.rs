//! Host-side plumbing for the `vscroll` crate.
//!
//! The `vscroll` crate is UI-agnostic and focuses on the windowing math and state. This crate
//! provides the framework-neutral pieces a host needs around it:
//!
//! - A [`ScrollController`] that debounces scroll and resize bursts through an injected
//!   [`Scheduler`] and writes measurements back after paint
//! - A [`MeasurementProvider`] capability for observing rendered items
//! - Keyed renderers that emit absolutely positioned render calls without duplicate keys
//! - [`VirtualList`] / [`VirtualGrid`] handles with an explicit `create` / `dispose` lifecycle
//!
//! No UI toolkit bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod engine;
mod grid;
mod key;
mod list;
mod measurement;
mod render;
mod scheduler;

#[cfg(test)]
mod tests;

pub use controller::{DEFAULT_DEBOUNCE_MS, ScrollController};
pub use engine::Engine;
pub use grid::{DEFAULT_ESTIMATED_ROW_HEIGHT, GridConfig, VirtualGrid};
pub use key::EngineKey;
pub use list::{DEFAULT_ESTIMATED_SIZE, DEFAULT_OVERSCAN, ListConfig, VirtualList};
pub use measurement::{MeasurementProvider, NoopMeasurement, ObservedKeys};
pub use render::{
    Cell, GridPass, GridRenderer, KeyOf, KeyedEmitter, ListPass, ListRenderer, Positioned,
    RegionProps, RenderItem, RowPass,
};
pub use scheduler::{Debouncer, ManualScheduler, Scheduler};
