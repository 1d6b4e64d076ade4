use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use vscroll::{GridVirtualizer, KeyMap, ListVirtualizer};

use crate::EngineKey;

pub type KeyOf<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;
pub type RenderItem<T, V> = Arc<dyn Fn(&T, usize) -> V + Send + Sync>;

/// Admits each key at most once per pass.
#[derive(Clone, Debug)]
pub struct KeyedEmitter<K> {
    seen: KeyMap<K, usize>,
}

impl<K: EngineKey> Default for KeyedEmitter<K> {
    fn default() -> Self {
        Self {
            seen: KeyMap::default(),
        }
    }
}

impl<K: EngineKey> KeyedEmitter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pass.
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    /// Returns `false` when `key` was already emitted in this pass.
    pub fn admit(&mut self, key: &K, index: usize) -> bool {
        if self.seen.contains_key(key) {
            vwarn!(index, "duplicate key in render pass; skipping");
            return false;
        }
        self.seen.insert(key.clone(), index);
        true
    }

    /// Index at which `key` was emitted in the current pass.
    pub fn emitted_at(&self, key: &K) -> Option<usize> {
        self.seen.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One materialized item, absolutely positioned at its cumulative offset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Positioned<K, V> {
    pub key: K,
    pub index: usize,
    pub offset: u64,
    pub extent: u32,
    pub view: V,
}

/// Output of one list render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListPass<K, V> {
    /// Scrollable extent of the whole list, however few items are materialized.
    pub total_extent: u64,
    pub scroll_offset: u64,
    pub class_name: String,
    pub aria_label: String,
    pub items: Vec<Positioned<K, V>>,
}

/// One grid cell inside a [`RowPass`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell<K, V> {
    pub key: K,
    pub index: usize,
    pub column: usize,
    pub view: V,
}

/// One materialized grid row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowPass<K, V> {
    pub row: usize,
    pub offset: u64,
    pub extent: u32,
    pub cells: Vec<Cell<K, V>>,
}

/// Output of one grid render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPass<K, V> {
    pub total_extent: u64,
    pub scroll_offset: u64,
    pub columns: usize,
    pub class_name: String,
    pub aria_label: String,
    pub rows: Vec<RowPass<K, V>>,
}

/// Scroll-region props shared by both renderers. No behavioral effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionProps {
    pub class_name: String,
    pub aria_label: String,
}

/// Turns a list window into positioned render calls.
pub struct ListRenderer<T, K, V> {
    key_of: KeyOf<T, K>,
    render_item: RenderItem<T, V>,
    props: RegionProps,
    emitter: KeyedEmitter<K>,
}

impl<T, K: fmt::Debug, V> fmt::Debug for ListRenderer<T, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRenderer")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

impl<T, K: EngineKey, V> ListRenderer<T, K, V> {
    pub fn new(key_of: KeyOf<T, K>, render_item: RenderItem<T, V>, props: RegionProps) -> Self {
        Self {
            key_of,
            render_item,
            props,
            emitter: KeyedEmitter::new(),
        }
    }

    pub fn key_of(&self, item: &T) -> K {
        (self.key_of)(item)
    }

    pub fn props(&self) -> &RegionProps {
        &self.props
    }

    /// Emits one [`Positioned`] per rendered index, ascending. Indexes past `items` (the slice
    /// shrank before a resync) and repeated keys are skipped.
    pub fn pass(&mut self, items: &[T], v: &ListVirtualizer<K>) -> ListPass<K, V> {
        self.emitter.reset();
        let mut out = Vec::new();
        v.for_each_virtual_item(|it| {
            let Some(item) = items.get(it.index) else {
                return;
            };
            let key = (self.key_of)(item);
            if !self.emitter.admit(&key, it.index) {
                return;
            }
            out.push(Positioned {
                key,
                index: it.index,
                offset: it.start,
                extent: it.size,
                view: (self.render_item)(item, it.index),
            });
        });
        ListPass {
            total_extent: v.total_extent(),
            scroll_offset: v.scroll_offset(),
            class_name: self.props.class_name.clone(),
            aria_label: self.props.aria_label.clone(),
            items: out,
        }
    }
}

/// Turns a grid window into row-wise render calls.
pub struct GridRenderer<T, K, V> {
    key_of: KeyOf<T, K>,
    render_item: RenderItem<T, V>,
    props: RegionProps,
    emitter: KeyedEmitter<K>,
}

impl<T, K: fmt::Debug, V> fmt::Debug for GridRenderer<T, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRenderer")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

impl<T, K: EngineKey, V> GridRenderer<T, K, V> {
    pub fn new(key_of: KeyOf<T, K>, render_item: RenderItem<T, V>, props: RegionProps) -> Self {
        Self {
            key_of,
            render_item,
            props,
            emitter: KeyedEmitter::new(),
        }
    }

    pub fn key_of(&self, item: &T) -> K {
        (self.key_of)(item)
    }

    pub fn props(&self) -> &RegionProps {
        &self.props
    }

    /// Emits one [`RowPass`] per rendered row, each holding its cells in column order.
    pub fn pass(&mut self, items: &[T], g: &GridVirtualizer<K>) -> GridPass<K, V> {
        self.emitter.reset();
        let mut rows = Vec::new();
        g.for_each_virtual_row(|row| {
            let mut cells = Vec::with_capacity(row.items.len());
            for (column, index) in row.items.iter().enumerate() {
                let Some(item) = items.get(index) else {
                    break;
                };
                let key = (self.key_of)(item);
                if !self.emitter.admit(&key, index) {
                    continue;
                }
                cells.push(Cell {
                    key,
                    index,
                    column,
                    view: (self.render_item)(item, index),
                });
            }
            if !cells.is_empty() {
                rows.push(RowPass {
                    row: row.row,
                    offset: row.start,
                    extent: row.size,
                    cells,
                });
            }
        });
        GridPass {
            total_extent: g.total_extent(),
            scroll_offset: g.scroll_offset(),
            columns: g.columns(),
            class_name: self.props.class_name.clone(),
            aria_label: self.props.aria_label.clone(),
            rows,
        }
    }
}
