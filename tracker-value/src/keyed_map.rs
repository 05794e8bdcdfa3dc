//! Unique-keyed map payloads.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use core::borrow::Borrow;

use ordered_float::OrderedFloat;

use crate::{MacAddr, SharedValue};

/// Children keyed by a unique, ordered key. Iterates in ascending key order.
#[derive(Debug, Clone)]
pub struct KeyedMap<K: Ord> {
    entries: BTreeMap<K, SharedValue>,
}

/// Map keyed by signed integers.
pub type IntMap = KeyedMap<i64>;

/// Map keyed by hardware address.
pub type MacMap = KeyedMap<MacAddr>;

/// Map keyed by text.
pub type StringMap = KeyedMap<String>;

/// Map keyed by double. Keys are totally ordered; `NaN` sorts last.
pub type DoubleMap = KeyedMap<OrderedFloat<f64>>;

impl<K: Ord> Default for KeyedMap<K> {
    fn default() -> Self {
        KeyedMap {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord> KeyedMap<K> {
    /// An empty map.
    pub const fn new() -> Self {
        KeyedMap {
            entries: BTreeMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace the child under `key`, returning the replaced one.
    pub fn insert(&mut self, key: impl Into<K>, value: SharedValue) -> Option<SharedValue> {
        self.entries.insert(key.into(), value)
    }

    /// Child under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&SharedValue>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns `true` if a child is under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Remove and return the child under `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<SharedValue>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Keep only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &SharedValue) -> bool) {
        self.entries.retain(|k, v| f(k, v));
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, SharedValue> {
        self.entries.iter()
    }

    /// Keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, K, SharedValue> {
        self.entries.keys()
    }

    /// Children in key order.
    pub fn values(&self) -> btree_map::Values<'_, K, SharedValue> {
        self.entries.values()
    }
}

impl<'a, K: Ord> IntoIterator for &'a KeyedMap<K> {
    type Item = (&'a K, &'a SharedValue);
    type IntoIter = btree_map::Iter<'a, K, SharedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Ord, Q: Into<K>> FromIterator<(Q, SharedValue)> for KeyedMap<K> {
    fn from_iter<I: IntoIterator<Item = (Q, SharedValue)>>(iter: I) -> Self {
        KeyedMap {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Ord> PartialEq for KeyedMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, a), (kb, b))| ka == kb && a.same_content(b))
    }
}
