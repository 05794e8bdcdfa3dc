//! Shared ownership of tracked values.

use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{FieldId, TrackedValue, ValueKind};

/// Read guard over a shared value.
pub type ValueReadGuard<'a> = RwLockReadGuard<'a, TrackedValue>;

/// Write guard over a shared value.
pub type ValueWriteGuard<'a> = RwLockWriteGuard<'a, TrackedValue>;

/// A handle to a tracked value that may be referenced from several places at
/// once: a record's field slot, one or more containers, and a summary tree.
///
/// Cloning the handle shares the node; it never copies the value. A node
/// lives as long as its longest holder. Equality and hashing are by identity,
/// so two handles are equal only if they point at the same node; use
/// [`TrackedValue`]'s `PartialEq` on the guarded values to compare contents.
#[derive(Clone)]
pub struct SharedValue(Arc<RwLock<TrackedValue>>);

impl SharedValue {
    /// Wrap a value into a fresh node.
    pub fn new(value: TrackedValue) -> Self {
        SharedValue(Arc::new(RwLock::new(value)))
    }

    /// A fresh node holding the default payload of `kind`.
    pub fn of_kind(kind: ValueKind) -> Self {
        Self::new(TrackedValue::new(kind))
    }

    /// A fresh node holding the default payload of `kind`, tagged with `id`.
    pub fn with_id(kind: ValueKind, id: FieldId) -> Self {
        Self::new(TrackedValue::with_id(kind, id))
    }

    /// Lock the node for reading.
    pub fn read(&self) -> ValueReadGuard<'_> {
        self.0.read()
    }

    /// Lock the node for writing.
    pub fn write(&self) -> ValueWriteGuard<'_> {
        self.0.write()
    }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Kind of the node's payload.
    pub fn kind(&self) -> ValueKind {
        self.read().kind()
    }

    /// Field id of the node.
    pub fn id(&self) -> FieldId {
        self.read().id()
    }

    /// Retag the node with a new field id.
    pub fn set_id(&self, id: FieldId) {
        self.write().set_id(id);
    }

    /// A fresh node of the same kind and identity, default payload.
    pub fn clone_type(&self) -> SharedValue {
        SharedValue::new(self.read().clone_type())
    }

    /// Run the node's pre-serialize hook, if any.
    pub fn pre_serialize(&self) {
        self.write().pre_serialize();
    }

    /// Number of handles currently sharing this node.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Returns `true` if both nodes hold equal contents. Identical nodes are
    /// equal without being locked twice.
    pub fn same_content(&self, other: &SharedValue) -> bool {
        self.ptr_eq(other) || *self.read() == *other.read()
    }
}

impl From<TrackedValue> for SharedValue {
    fn from(value: TrackedValue) -> Self {
        SharedValue::new(value)
    }
}

impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SharedValue {}

impl Hash for SharedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(guard) => fmt::Debug::fmt(&*guard, f),
            None => f.write_str("<locked>"),
        }
    }
}
