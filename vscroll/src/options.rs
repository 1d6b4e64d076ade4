use alloc::sync::Arc;

use crate::{ColumnBreakpoints, ConfigError, Rect};

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated offset (e.g. restored from a saved session), read on construction.
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::ListVirtualizer`].
#[derive(Clone, Debug)]
pub struct ListOptions {
    /// Extent used for items that have not been measured yet.
    pub estimated_size: u32,
    /// Space between consecutive items.
    pub gap: u32,
    /// Extra items rendered beyond the visible window on each side.
    pub overscan: usize,
    /// Container geometry known before the first resize event.
    pub initial_rect: Option<Rect>,
    pub initial_offset: InitialOffset,
    /// Keep the topmost visible item pinned when items above it change extent.
    pub anchor_correction: bool,
}

impl ListOptions {
    pub fn new(estimated_size: u32) -> Self {
        Self {
            estimated_size,
            gap: 0,
            overscan: 1,
            initial_rect: None,
            initial_offset: InitialOffset::default(),
            anchor_correction: true,
        }
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_anchor_correction(mut self, anchor_correction: bool) -> Self {
        self.anchor_correction = anchor_correction;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimated_size == 0 {
            return Err(ConfigError::NonPositiveEstimate);
        }
        Ok(())
    }
}

/// Configuration for [`crate::GridVirtualizer`].
#[derive(Clone, Debug)]
pub struct GridOptions {
    /// Extent used for rows that have not been measured yet.
    pub estimated_row_height: u32,
    /// Space between consecutive rows.
    pub gap: u32,
    /// Extra rows rendered beyond the visible window on each side.
    pub overscan: usize,
    pub columns: ColumnBreakpoints,
    pub initial_rect: Option<Rect>,
    pub initial_offset: InitialOffset,
    /// Keep the topmost visible row pinned when rows above it change extent, and keep the first
    /// visible item in view when the column count changes.
    pub anchor_correction: bool,
}

impl GridOptions {
    pub fn new(estimated_row_height: u32, columns: ColumnBreakpoints) -> Self {
        Self {
            estimated_row_height,
            gap: 0,
            overscan: 1,
            columns,
            initial_rect: None,
            initial_offset: InitialOffset::default(),
            anchor_correction: true,
        }
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_columns(mut self, columns: ColumnBreakpoints) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_anchor_correction(mut self, anchor_correction: bool) -> Self {
        self.anchor_correction = anchor_correction;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimated_row_height == 0 {
            return Err(ConfigError::NonPositiveEstimate);
        }
        self.columns.validate()
    }
}
