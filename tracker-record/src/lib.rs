//! Typed records over tracked value trees.
//!
//! A record is a field-map node whose children are described by a static
//! table of [`FieldDef`]s. Building a record registers every row with the
//! [`FieldRegistry`](tracker_registry::FieldRegistry), then reserves the bound
//! rows: each one gets a child node in the map and a [`Slot`] pointing at it.
//!
//! Reservation can start from nothing ([`Record::new`]) or from a tree that
//! was parsed without knowing its type ([`Record::anneal`]). Annealing binds
//! the children that are already there, without copying, creates the ones
//! that are missing, and leaves undeclared children alone.

#![warn(missing_docs)]

use tracker_registry::SharedRegistry;
use tracker_value::{FieldId, PreSerializeHook, SharedValue};

mod tracing_macros;
use tracing_macros::debug;

mod error;
pub use error::RecordError;

mod field;
pub use field::{BuilderFn, FieldDef, SlotFn, record_builder};

mod base;
pub use base::RecordBase;

mod slot;
pub use slot::{LazySlot, Slot};

/// A typed view over a field-map node.
///
/// Implementors provide the field table and the plumbing to their
/// [`RecordBase`]; construction, reservation and annealing are provided.
pub trait Record: Sized + Send + Sync + 'static {
    /// The record's field table, in registration order.
    fn fields() -> &'static [FieldDef<Self>];

    /// Shared record state.
    fn base(&self) -> &RecordBase;

    /// Shared record state, mutably.
    fn base_mut(&mut self) -> &mut RecordBase;

    /// A record around `base` with every slot unbound.
    fn blank(base: RecordBase) -> Self;

    /// Hook installed on the record's node, run before it is serialized.
    fn pre_serialize_hook(&self) -> Option<PreSerializeHook> {
        None
    }

    /// A new record with a fresh child for every bound field.
    fn new(registry: &SharedRegistry, id: FieldId) -> Result<Self, RecordError> {
        let base = RecordBase::new(registry.clone(), id);
        assemble(base, None)
    }

    /// A record adopting the parsed field map `existing` as its node.
    fn anneal(
        registry: &SharedRegistry,
        id: FieldId,
        existing: &SharedValue,
    ) -> Result<Self, RecordError> {
        let base = RecordBase::adopt(registry.clone(), id, existing)?;
        assemble(base, Some(existing))
    }

    /// A fresh, empty record with the same type and field id.
    fn clone_type(&self) -> Result<Self, RecordError> {
        Self::new(self.base().registry(), self.base().id())
    }

    /// Bind every bound field of the table, importing children from
    /// `existing` where it has them.
    fn reserve_fields(&mut self, existing: Option<&SharedValue>) -> Result<(), RecordError> {
        let mut bound = 0usize;
        for def in Self::fields() {
            let Some(slot) = def.slot else { continue };
            let id = self.base().field_id(def.name)?;
            let child = self.base().import_or_new(existing, id)?;
            slot(self).bind(child);
            bound += 1;
        }
        debug!(
            id = self.base().id(),
            bound,
            annealed = existing.is_some(),
            "record fields reserved"
        );
        Ok(())
    }

    /// The record's field-map node.
    fn node(&self) -> &SharedValue {
        self.base().node()
    }

    /// Give up the typed view and keep the node.
    fn into_node(self) -> SharedValue {
        self.base().node().clone()
    }

    /// Resolve a `/`-separated path of field names below this record.
    fn get_child_path(&self, path: &str) -> Option<SharedValue> {
        self.base().get_child_path(path)
    }
}

fn assemble<R: Record>(
    mut base: RecordBase,
    existing: Option<&SharedValue>,
) -> Result<R, RecordError> {
    base.register_fields(R::fields())?;
    let mut record = R::blank(base);
    record.reserve_fields(existing)?;
    if let Some(hook) = record.pre_serialize_hook() {
        record.node().write().set_pre_serialize_hook(hook);
    }
    Ok(record)
}
