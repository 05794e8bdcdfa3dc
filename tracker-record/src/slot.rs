//! Bound child handles.

use tracker_value::{Number, Scalar, SharedValue, ValueReadGuard, ValueWriteGuard};

use crate::{Record, RecordBase, RecordError};

/// A record's handle on one of its reserved children.
///
/// Empty until the record reserves its fields; every accessor fails with
/// [`RecordError::NotReserved`] until then. The bound node is shared with the
/// record's map, so writes through the slot are visible in the tree.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    node: Option<SharedValue>,
}

impl Slot {
    /// An unbound slot.
    pub const fn new() -> Self {
        Slot { node: None }
    }

    pub(crate) fn bind(&mut self, node: SharedValue) {
        self.node = Some(node);
    }

    /// Returns `true` once the slot is bound.
    pub fn is_reserved(&self) -> bool {
        self.node.is_some()
    }

    /// The bound node.
    pub fn node(&self) -> Result<&SharedValue, RecordError> {
        self.node.as_ref().ok_or(RecordError::NotReserved)
    }

    /// Lock the bound node for reading.
    pub fn read(&self) -> Result<ValueReadGuard<'_>, RecordError> {
        Ok(self.node()?.read())
    }

    /// Lock the bound node for writing.
    pub fn write(&self) -> Result<ValueWriteGuard<'_>, RecordError> {
        Ok(self.node()?.write())
    }

    /// Current scalar value.
    pub fn get<T: Scalar>(&self) -> Result<T, RecordError> {
        Ok(self.read()?.get::<T>()?)
    }

    /// Replace the scalar value.
    pub fn set<T: Scalar>(&self, v: T) -> Result<(), RecordError> {
        Ok(self.write()?.set(v)?)
    }

    /// Replace the scalar value, then report it to `on_set`. Returns what
    /// `on_set` returns. The write lock is released before `on_set` runs.
    pub fn set_with<T: Scalar + Clone>(
        &self,
        v: T,
        on_set: impl FnOnce(&T) -> bool,
    ) -> Result<bool, RecordError> {
        self.set(v.clone())?;
        Ok(on_set(&v))
    }

    /// `+=`
    pub fn add(&self, rhs: impl Into<Number>) -> Result<(), RecordError> {
        Ok(self.write()?.add(rhs)?)
    }

    /// `-=`
    pub fn sub(&self, rhs: impl Into<Number>) -> Result<(), RecordError> {
        Ok(self.write()?.sub(rhs)?)
    }

    /// `+= 1`
    pub fn increment(&self) -> Result<(), RecordError> {
        Ok(self.write()?.increment()?)
    }

    /// `-= 1`
    pub fn decrement(&self) -> Result<(), RecordError> {
        Ok(self.write()?.decrement()?)
    }

    /// Set the bits of `mask`.
    pub fn bitset(&self, mask: u64) -> Result<(), RecordError> {
        Ok(self.write()?.bitset(mask)?)
    }

    /// Clear the bits of `mask`.
    pub fn bitclear(&self, mask: u64) -> Result<(), RecordError> {
        Ok(self.write()?.bitclear(mask)?)
    }

    /// Returns `true` if any bit of `mask` is set.
    pub fn bitcheck(&self, mask: u64) -> Result<bool, RecordError> {
        Ok(self.read()?.bitcheck(mask)?)
    }
}

/// A nested record that is only built when first asked for.
///
/// On first access the child under the field's id is looked up in the parent
/// map. If a parsed tree already holds it, the record is annealed onto that
/// node; otherwise a fresh instance comes from the registry and is inserted
/// into the parent.
#[derive(Debug)]
pub struct LazySlot<C> {
    record: Option<C>,
}

impl<C> Default for LazySlot<C> {
    fn default() -> Self {
        LazySlot { record: None }
    }
}

impl<C: Record> LazySlot<C> {
    /// An empty slot.
    pub const fn new() -> Self {
        LazySlot { record: None }
    }

    /// Returns `true` once the record has been built.
    pub fn is_built(&self) -> bool {
        self.record.is_some()
    }

    /// The record, if already built.
    pub fn get(&self) -> Option<&C> {
        self.record.as_ref()
    }

    /// The record registered under `field` in `parent`'s table, building it
    /// on first access.
    pub fn get_or_init(&mut self, parent: &RecordBase, field: &str) -> Result<&mut C, RecordError> {
        let record = match self.record.take() {
            Some(record) => record,
            None => Self::build(parent, parent.field_id(field)?)?,
        };
        Ok(self.record.insert(record))
    }

    fn build(parent: &RecordBase, id: tracker_value::FieldId) -> Result<C, RecordError> {
        let existing = parent.node().read().as_field_map()?.find(id).cloned();
        let node = match existing {
            Some(node) => node,
            None => {
                let node = parent.registry().instance_of(id)?;
                parent.node().write().as_field_map_mut()?.insert(id, node.clone());
                node
            }
        };
        C::anneal(parent.registry(), id, &node)
    }

    /// Drop the typed view. The node stays in the parent's map.
    pub fn reset(&mut self) {
        self.record = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_value::{TrackedValue, ValueKind};

    #[test]
    fn unbound_slot_fails_fast() {
        let slot = Slot::new();
        assert!(!slot.is_reserved());
        assert_eq!(slot.get::<u32>(), Err(RecordError::NotReserved));
        assert_eq!(slot.increment(), Err(RecordError::NotReserved));
        assert!(matches!(slot.read(), Err(RecordError::NotReserved)));
    }

    #[test]
    fn bound_slot_writes_through() {
        let node = SharedValue::new(TrackedValue::from(5u32));
        let mut slot = Slot::new();
        slot.bind(node.clone());

        slot.add(3u32).unwrap();
        assert_eq!(node.read().get::<u32>(), Ok(8));
        slot.bitset(0b100).unwrap();
        assert_eq!(slot.bitcheck(0b100), Ok(true));
        slot.bitclear(0b100).unwrap();
        assert_eq!(slot.get::<u32>(), Ok(8));
        slot.decrement().unwrap();
        slot.sub(2u32).unwrap();
        assert_eq!(slot.get::<u32>(), Ok(5));
    }

    #[test]
    fn set_with_reports_after_writing() {
        let node = SharedValue::of_kind(ValueKind::String);
        let mut slot = Slot::new();
        slot.bind(node.clone());

        let accepted = slot
            .set_with(String::from("acme"), |v| {
                // the lock is free again here
                assert_eq!(node.read().as_str(), Ok("acme"));
                v.len() == 4
            })
            .unwrap();
        assert!(accepted);
    }

    #[test]
    fn kind_mismatch_surfaces_as_value_error() {
        let mut slot = Slot::new();
        slot.bind(SharedValue::new(TrackedValue::from("x")));
        assert!(matches!(slot.add(1u8), Err(RecordError::Value(_))));
    }
}
