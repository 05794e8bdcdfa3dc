//! In-memory field registry.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracker_value::{FieldId, SharedValue, ValueKind};

use crate::tracing_macros::{debug, warning};
use crate::{ElementBuilder, FieldInfo, FieldRegistry, RegistryError};

struct Entry {
    name: String,
    description: String,
    builder: ElementBuilder,
}

#[derive(Default)]
struct Fields {
    by_name: HashMap<String, FieldId>,
    // indexed by field id
    entries: Vec<Entry>,
}

impl Fields {
    fn entry(&self, id: FieldId) -> Option<&Entry> {
        usize::try_from(id).ok().and_then(|i| self.entries.get(i))
    }
}

/// Thread-safe in-memory [`FieldRegistry`].
///
/// Ids are handed out sequentially from 0 in registration order and are
/// never reused. Lookups take a shared lock; only new registrations take
/// the exclusive one.
#[derive(Default)]
pub struct EntryTracker {
    fields: RwLock<Fields>,
}

impl EntryTracker {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.read().entries.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every registered field, in id order.
    pub fn fields(&self) -> Vec<FieldInfo> {
        let fields = self.fields.read();
        fields
            .entries
            .iter()
            .zip(0..)
            .map(|(e, id)| FieldInfo {
                id,
                name: e.name.clone(),
                kind: e.builder.kind(),
                description: e.description.clone(),
            })
            .collect()
    }

    fn register(
        &self,
        name: &str,
        builder: ElementBuilder,
        description: &str,
    ) -> Result<FieldId, RegistryError> {
        if let Some(id) = self.check_existing(name, &builder)? {
            return Ok(id);
        }

        let mut fields = self.fields.write();
        // Someone may have registered it between the two locks.
        if let Some(&id) = fields.by_name.get(name) {
            drop(fields);
            return Ok(self.check_existing(name, &builder)?.unwrap_or(id));
        }

        let id = FieldId::try_from(fields.entries.len()).unwrap_or(FieldId::MAX);
        debug!(id, field = name, kind = %builder.kind(), custom = builder.is_custom(), "registered field");
        fields.entries.push(Entry {
            name: name.to_owned(),
            description: description.to_owned(),
            builder,
        });
        fields.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// `Ok(Some(id))` if `name` already exists with a compatible kind. A
    /// custom builder replaces a plain one registered earlier.
    fn check_existing(
        &self,
        name: &str,
        builder: &ElementBuilder,
    ) -> Result<Option<FieldId>, RegistryError> {
        let fields = self.fields.upgradable_read();
        let Some(&id) = fields.by_name.get(name) else {
            return Ok(None);
        };
        let Some(entry) = fields.entry(id) else {
            return Ok(None);
        };
        let registered = entry.builder.kind();
        if registered != builder.kind() {
            warning!(field = name, %registered, requested = %builder.kind(), "field kind conflict");
            return Err(RegistryError::Conflict {
                name: name.to_owned(),
                registered,
                requested: builder.kind(),
            });
        }
        if builder.is_custom() && !entry.builder.is_custom() {
            let mut fields = parking_lot::RwLockUpgradableReadGuard::upgrade(fields);
            if let Some(entry) = usize::try_from(id).ok().and_then(|i| fields.entries.get_mut(i)) {
                entry.builder = builder.clone();
            }
        }
        Ok(Some(id))
    }
}

impl FieldRegistry for EntryTracker {
    fn resolve_or_create(
        &self,
        name: &str,
        kind: ValueKind,
        description: &str,
    ) -> Result<FieldId, RegistryError> {
        self.register(name, ElementBuilder::of_kind(kind), description)
    }

    fn register_builder(
        &self,
        name: &str,
        builder: ElementBuilder,
        description: &str,
    ) -> Result<FieldId, RegistryError> {
        self.register(name, builder, description)
    }

    fn id_of(&self, name: &str) -> Option<FieldId> {
        self.fields.read().by_name.get(name).copied()
    }

    fn name_of(&self, id: FieldId) -> Option<String> {
        self.fields.read().entry(id).map(|e| e.name.clone())
    }

    fn description_of(&self, id: FieldId) -> Option<String> {
        self.fields.read().entry(id).map(|e| e.description.clone())
    }

    fn kind_of(&self, id: FieldId) -> Option<ValueKind> {
        self.fields.read().entry(id).map(|e| e.builder.kind())
    }

    fn instance_of(&self, id: FieldId) -> Result<SharedValue, RegistryError> {
        // Clone the builder out so custom builders can call back into the
        // registry without deadlocking.
        let builder = self
            .fields
            .read()
            .entry(id)
            .map(|e| e.builder.clone())
            .ok_or(RegistryError::UnknownField { id })?;
        Ok(builder.build(id))
    }
}
