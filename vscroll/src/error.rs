use crate::key::{KeyCacheKey, KeyMap};

/// Configuration mistakes detected by the `validate` helpers.
///
/// Runtime paths never return these: they clamp or ignore bad input instead. The helpers exist so
/// that hosts (and their tests) can catch misuse explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("estimated size must be positive")]
    NonPositiveEstimate,
    #[error("item key at index {index} duplicates the key at index {first}")]
    DuplicateKey { first: usize, index: usize },
    #[error("breakpoint thresholds must be strictly ascending")]
    BreakpointThresholdsNotAscending,
    #[error("breakpoint column counts must not decrease as width grows")]
    BreakpointColumnsDecreasing,
    #[error("column count must be at least 1")]
    ZeroColumns,
}

/// Reports the first duplicated key in `keys`, if any.
pub fn check_unique_keys<K: KeyCacheKey>(
    keys: impl IntoIterator<Item = K>,
) -> Result<(), ConfigError> {
    let mut seen = KeyMap::<K, usize>::default();
    for (index, key) in keys.into_iter().enumerate() {
        if let Some(&first) = seen.get(&key) {
            return Err(ConfigError::DuplicateKey { first, index });
        }
        seen.insert(key, index);
    }
    Ok(())
}
