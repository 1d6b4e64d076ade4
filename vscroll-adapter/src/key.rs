use vscroll::KeyCacheKey;

/// Bound required of keys flowing through the adapter: the core's key bound plus `Clone`, since
/// keys are stored per index and in the observed set.
pub trait EngineKey: KeyCacheKey + Clone {}

impl<T: KeyCacheKey + Clone> EngineKey for T {}
