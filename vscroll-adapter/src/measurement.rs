use vscroll::KeySet;

use crate::EngineKey;

/// Size observation for rendered items.
///
/// The controller calls `observe` when a key enters the rendered window and `unobserve` when it
/// leaves (or on dispose). The host wires its native size primitive (a resize observer, a layout
/// pass, a terminal resize signal) to [`crate::ScrollController::report_item_size`] for every
/// observed key.
pub trait MeasurementProvider<K> {
    fn observe(&mut self, key: &K);
    fn unobserve(&mut self, key: &K);
}

/// A provider for hosts that never measure: every item keeps its estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopMeasurement;

impl<K> MeasurementProvider<K> for NoopMeasurement {
    fn observe(&mut self, _key: &K) {}

    fn unobserve(&mut self, _key: &K) {}
}

/// Tracks the set of observed keys.
#[derive(Clone, Debug)]
pub struct ObservedKeys<K> {
    keys: KeySet<K>,
}

impl<K: EngineKey> Default for ObservedKeys<K> {
    fn default() -> Self {
        Self {
            keys: KeySet::default(),
        }
    }
}

impl<K: EngineKey> ObservedKeys<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: EngineKey> MeasurementProvider<K> for ObservedKeys<K> {
    fn observe(&mut self, key: &K) {
        self.keys.insert(key.clone());
    }

    fn unobserve(&mut self, key: &K) {
        self.keys.remove(key);
    }
}

impl<K, M: MeasurementProvider<K> + ?Sized> MeasurementProvider<K> for &mut M {
    fn observe(&mut self, key: &K) {
        (**self).observe(key);
    }

    fn unobserve(&mut self, key: &K) {
        (**self).unobserve(key);
    }
}
