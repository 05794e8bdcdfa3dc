//! Field-id keyed multi-map payload.

use alloc::vec::Vec;
use core::fmt;

use crate::{FieldId, SharedValue};

/// Children keyed by field id.
///
/// Several children may share an id. Iteration is in ascending id order and,
/// among equal ids, in insertion order. Lookups by id return the first match.
#[derive(Clone, Default)]
pub struct FieldMap {
    entries: Vec<(FieldId, SharedValue)>,
}

impl FieldMap {
    /// An empty map.
    pub const fn new() -> Self {
        FieldMap {
            entries: Vec::new(),
        }
    }

    /// Number of entries, counting duplicate ids separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lower_bound(&self, id: FieldId) -> usize {
        self.entries.partition_point(|(k, _)| *k < id)
    }

    fn upper_bound(&self, id: FieldId) -> usize {
        self.entries.partition_point(|(k, _)| *k <= id)
    }

    /// Insert `value` under `id`, after any entries already under that id.
    pub fn insert(&mut self, id: FieldId, value: SharedValue) {
        let pos = self.upper_bound(id);
        self.entries.insert(pos, (id, value));
    }

    /// Insert `value` under its own field id.
    pub fn insert_node(&mut self, value: SharedValue) {
        let id = value.id();
        self.insert(id, value);
    }

    /// First entry under `id`.
    pub fn find(&self, id: FieldId) -> Option<&SharedValue> {
        self.entries
            .get(self.lower_bound(id))
            .filter(|(k, _)| *k == id)
            .map(|(_, v)| v)
    }

    /// Every entry under `id`, in insertion order.
    pub fn find_all(&self, id: FieldId) -> impl Iterator<Item = &SharedValue> + '_ {
        let range = self.lower_bound(id)..self.upper_bound(id);
        self.entries[range].iter().map(|(_, v)| v)
    }

    /// Returns `true` if at least one entry is under `id`.
    pub fn contains(&self, id: FieldId) -> bool {
        self.find(id).is_some()
    }

    /// Remove every entry under `id`, returning how many were removed.
    pub fn remove(&mut self, id: FieldId) -> usize {
        let range = self.lower_bound(id)..self.upper_bound(id);
        let removed = range.len();
        self.entries.drain(range);
        removed
    }

    /// Remove the first entry that is `node` (by identity).
    pub fn remove_node(&mut self, node: &SharedValue) -> bool {
        match self.entries.iter().position(|(_, v)| v.ptr_eq(node)) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Keep only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(FieldId, &SharedValue) -> bool) {
        self.entries.retain(|(k, v)| f(*k, v));
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in id order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Ids in order, repeated for duplicates.
    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Children in id order.
    pub fn values(&self) -> impl Iterator<Item = &SharedValue> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Iterator over `(id, child)` pairs of a [`FieldMap`].
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, (FieldId, SharedValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (FieldId, &'a SharedValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (FieldId, &'a SharedValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<SharedValue> for FieldMap {
    fn from_iter<I: IntoIterator<Item = SharedValue>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for value in iter {
            map.insert_node(value);
        }
        map
    }
}

impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, a), (kb, b))| ka == kb && a.same_content(b))
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
