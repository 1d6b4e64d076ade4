use crate::ConfigError;

/// Default width at which the `md` tier starts.
pub const MD_MIN_WIDTH: u32 = 768;
/// Default width at which the `lg` tier starts.
pub const LG_MIN_WIDTH: u32 = 1024;
/// Default width at which the `xl` tier starts.
pub const XL_MIN_WIDTH: u32 = 1280;

/// Minimum widths of the `md`, `lg` and `xl` tiers. `sm` has no threshold: it is the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            md: MD_MIN_WIDTH,
            lg: LG_MIN_WIDTH,
            xl: XL_MIN_WIDTH,
        }
    }
}

/// Responsive column counts for a grid, one per width tier.
///
/// The active tier is the largest one whose threshold is `<= width`; below `md` the `sm` count
/// applies. `xl` is optional and falls back to `lg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnBreakpoints {
    pub sm: usize,
    pub md: usize,
    pub lg: usize,
    pub xl: Option<usize>,
    pub thresholds: Thresholds,
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self::new(1, 2, 3)
    }
}

impl ColumnBreakpoints {
    pub const fn new(sm: usize, md: usize, lg: usize) -> Self {
        Self {
            sm,
            md,
            lg,
            xl: None,
            thresholds: Thresholds {
                md: MD_MIN_WIDTH,
                lg: LG_MIN_WIDTH,
                xl: XL_MIN_WIDTH,
            },
        }
    }

    /// A single column at every width.
    pub const fn single() -> Self {
        Self::new(1, 1, 1)
    }

    pub fn with_xl(mut self, xl: usize) -> Self {
        self.xl = Some(xl);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Resolves the column count for a viewport `width`. Always `>= 1`.
    pub fn resolve(&self, width: u32) -> usize {
        let t = &self.thresholds;
        let columns = match self.xl {
            Some(xl) if width >= t.xl => xl,
            _ if width >= t.lg => self.lg,
            _ if width >= t.md => self.md,
            _ => self.sm,
        };
        columns.max(1)
    }

    /// Checks the table for misconfiguration. Resolution still works on an invalid table, but
    /// the column count is only guaranteed to be monotonic in width for valid ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let ascending = t.md < t.lg && (self.xl.is_none() || t.lg < t.xl);
        if !ascending {
            return Err(ConfigError::BreakpointThresholdsNotAscending);
        }
        if self.sm == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        let top = self.xl.unwrap_or(self.lg);
        if !(self.sm <= self.md && self.md <= self.lg && self.lg <= top) {
            return Err(ConfigError::BreakpointColumnsDecreasing);
        }
        Ok(())
    }
}

/// Free-function form of [`ColumnBreakpoints::resolve`].
pub fn resolve_columns(width: u32, breakpoints: &ColumnBreakpoints) -> usize {
    breakpoints.resolve(width)
}
