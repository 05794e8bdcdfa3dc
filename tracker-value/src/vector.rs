//! Ordered sequence payload.

use alloc::vec::Vec;
use core::ops::Deref;

use crate::SharedValue;

/// Sequence of shared child values, kept in insertion order.
///
/// Dereferences to a slice for read access (`len`, `get`, `iter`, ...).
#[derive(Debug, Clone, Default)]
pub struct TrackedVector {
    items: Vec<SharedValue>,
}

impl TrackedVector {
    /// An empty sequence.
    pub const fn new() -> Self {
        TrackedVector { items: Vec::new() }
    }

    /// An empty sequence with room for `capacity` children.
    pub fn with_capacity(capacity: usize) -> Self {
        TrackedVector {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a child.
    pub fn push(&mut self, value: SharedValue) {
        self.items.push(value);
    }

    /// Insert a child at `index`, shifting later children. Returns the child
    /// back if `index` is past the end.
    pub fn insert(&mut self, index: usize, value: SharedValue) -> Result<(), SharedValue> {
        if index > self.items.len() {
            return Err(value);
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<SharedValue> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove the first child that is `node` (by identity).
    pub fn remove_node(&mut self, node: &SharedValue) -> bool {
        match self.items.iter().position(|v| v.ptr_eq(node)) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Keep only the children for which `f` returns `true`.
    pub fn retain(&mut self, f: impl FnMut(&SharedValue) -> bool) {
        self.items.retain(f);
    }

    /// Drop every child.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reserve room for `additional` more children.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// The children as a slice.
    pub fn as_slice(&self) -> &[SharedValue] {
        &self.items
    }
}

impl Deref for TrackedVector {
    type Target = [SharedValue];

    fn deref(&self) -> &[SharedValue] {
        &self.items
    }
}

impl PartialEq for TrackedVector {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.same_content(b))
    }
}

impl FromIterator<SharedValue> for TrackedVector {
    fn from_iter<I: IntoIterator<Item = SharedValue>>(iter: I) -> Self {
        TrackedVector {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<SharedValue> for TrackedVector {
    fn extend<I: IntoIterator<Item = SharedValue>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TrackedVector {
    type Item = &'a SharedValue;
    type IntoIter = core::slice::Iter<'a, SharedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TrackedVector {
    type Item = SharedValue;
    type IntoIter = alloc::vec::IntoIter<SharedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
