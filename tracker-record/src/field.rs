//! Field descriptors for record tables.

use std::sync::Arc;

use tracker_registry::{ElementBuilder, SharedRegistry};
use tracker_value::{SharedValue, ValueKind};

use crate::tracing_macros::warning;
use crate::{Record, Slot};

/// Picks a record's slot for a field. Usually a closure such as
/// `|r| &mut r.packets`.
pub type SlotFn<R> = fn(&mut R) -> &mut Slot;

/// Makes the builder a field is registered with.
pub type BuilderFn = fn(&SharedRegistry) -> ElementBuilder;

#[derive(Clone, Copy)]
pub(crate) enum Decl {
    Kind(ValueKind),
    Builder(BuilderFn),
}

/// One row of a record's field table.
///
/// A table is a `const` slice of these, returned by
/// [`Record::fields`](crate::Record::fields):
///
/// ```
/// use tracker_record::{FieldDef, Record, RecordBase, Slot};
/// use tracker_value::ValueKind;
///
/// struct Counter {
///     base: RecordBase,
///     hits: Slot,
/// }
///
/// impl Record for Counter {
///     fn fields() -> &'static [FieldDef<Self>] {
///         const FIELDS: &[FieldDef<Counter>] = &[FieldDef::scalar(
///             "counter.hits",
///             ValueKind::UInt64,
///             "times seen",
///             |r| &mut r.hits,
///         )];
///         FIELDS
///     }
///
///     fn base(&self) -> &RecordBase {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut RecordBase {
///         &mut self.base
///     }
///
///     fn blank(base: RecordBase) -> Self {
///         Counter { base, hits: Slot::new() }
///     }
/// }
/// ```
pub struct FieldDef<R> {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) decl: Decl,
    pub(crate) slot: Option<SlotFn<R>>,
}

impl<R> FieldDef<R> {
    /// A plain field created with the default payload of `kind` and bound to
    /// `slot` when fields are reserved.
    pub const fn scalar(
        name: &'static str,
        kind: ValueKind,
        description: &'static str,
        slot: SlotFn<R>,
    ) -> Self {
        FieldDef {
            name,
            description,
            decl: Decl::Kind(kind),
            slot: Some(slot),
        }
    }

    /// A field that is registered but never reserved. Use it for the
    /// children of nested maps the record does not bind itself.
    pub const fn unbound(name: &'static str, kind: ValueKind, description: &'static str) -> Self {
        FieldDef {
            name,
            description,
            decl: Decl::Kind(kind),
            slot: None,
        }
    }

    /// A field created by a custom builder and bound to `slot` when fields
    /// are reserved.
    pub const fn built(
        name: &'static str,
        builder: BuilderFn,
        description: &'static str,
        slot: SlotFn<R>,
    ) -> Self {
        FieldDef {
            name,
            description,
            decl: Decl::Builder(builder),
            slot: Some(slot),
        }
    }

    /// A nested record of type `C`. Its builder is registered so
    /// [`FieldRegistry::instance_of`](tracker_registry::FieldRegistry::instance_of)
    /// produces a reserved `C`, but the field is not reserved here. Bind it
    /// with a [`LazySlot`](crate::LazySlot) or by hand.
    pub const fn complex<C: Record>(name: &'static str, description: &'static str) -> Self {
        FieldDef {
            name,
            description,
            decl: Decl::Builder(record_builder::<C>),
            slot: None,
        }
    }

    /// Registered field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registered description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns `true` if the field is created or annealed on reservation.
    pub fn is_bound(&self) -> bool {
        self.slot.is_some()
    }
}

/// Builder producing fully reserved instances of record type `C`.
///
/// The builder holds the registry weakly; the registry owns the builder.
/// Never bind a record's own type through [`FieldDef::built`] with this
/// builder, reservation would recurse forever.
pub fn record_builder<C: Record>(registry: &SharedRegistry) -> ElementBuilder {
    let registry = Arc::downgrade(registry);
    ElementBuilder::new(ValueKind::Map, move |id| {
        let Some(registry) = registry.upgrade() else {
            return SharedValue::with_id(ValueKind::Map, id);
        };
        match C::new(&registry, id) {
            Ok(record) => record.into_node(),
            // Element builders cannot fail. `C::new` only errs on a registry
            // kind conflict, and `Record::anneal` reserves the missing fields
            // of this map once it is viewed as `C`.
            Err(err) => {
                warning!(id, %err, "record builder failed, using an empty map");
                SharedValue::with_id(ValueKind::Map, id)
            }
        }
    })
}
