#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

/// Map keyed by item identity. Hash-based with `std`, ordered without it.
#[cfg(feature = "std")]
pub type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub type KeySet<K> = BTreeSet<K>;

/// Bound required of item keys: `Hash + Eq` with `std`, `Ord` without it.
#[cfg(feature = "std")]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}
