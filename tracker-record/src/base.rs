use core::fmt;

use tracker_registry::SharedRegistry;
use tracker_value::{FieldId, Requested, SharedValue, ValueError, ValueKind};

use crate::field::{Decl, FieldDef};
use crate::tracing_macros::trace;
use crate::RecordError;

/// State every record carries: its field-map node, the registry handle and
/// the ids its field table resolved to.
#[derive(Clone)]
pub struct RecordBase {
    registry: SharedRegistry,
    node: SharedValue,
    ids: Vec<(&'static str, FieldId)>,
}

impl RecordBase {
    /// A base over a fresh field map tagged with `id`.
    pub fn new(registry: SharedRegistry, id: FieldId) -> Self {
        RecordBase {
            registry,
            node: SharedValue::with_id(ValueKind::Map, id),
            ids: Vec::new(),
        }
    }

    /// A base that adopts `existing` as its node. The node keeps its
    /// children, including ones the record never declares.
    pub fn adopt(
        registry: SharedRegistry,
        id: FieldId,
        existing: &SharedValue,
    ) -> Result<Self, RecordError> {
        let kind = existing.kind();
        if kind != ValueKind::Map {
            return Err(ValueError::TypeMismatch {
                actual: kind,
                requested: Requested::Kind(ValueKind::Map),
            }
            .into());
        }
        existing.set_id(id);
        Ok(RecordBase {
            registry,
            node: existing.clone(),
            ids: Vec::new(),
        })
    }

    /// The record's field-map node.
    pub fn node(&self) -> &SharedValue {
        &self.node
    }

    /// The registry this record resolves names through.
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Field id of the record itself.
    pub fn id(&self) -> FieldId {
        self.node.id()
    }

    /// Registered name of the record's own field.
    pub fn name(&self) -> Option<String> {
        self.registry.name_of(self.id())
    }

    /// Registered name of any field id.
    pub fn name_of(&self, id: FieldId) -> Option<String> {
        self.registry.name_of(id)
    }

    /// Id a field of this record's table resolved to.
    pub fn field_id(&self, name: &str) -> Result<FieldId, RecordError> {
        self.ids
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, id)| id)
            .ok_or_else(|| RecordError::Unregistered {
                field: name.to_owned(),
            })
    }

    /// Resolve every descriptor of `fields` through the registry, in table
    /// order, and remember the ids.
    pub fn register_fields<R>(&mut self, fields: &[FieldDef<R>]) -> Result<(), RecordError> {
        self.ids.clear();
        self.ids.reserve(fields.len());
        for def in fields {
            let id = match def.decl {
                Decl::Kind(kind) => {
                    self.registry
                        .resolve_or_create(def.name, kind, def.description)?
                }
                Decl::Builder(make) => {
                    self.registry
                        .register_builder(def.name, make(&self.registry), def.description)?
                }
            };
            trace!(id, field = def.name, "field registered");
            self.ids.push((def.name, id));
        }
        Ok(())
    }

    /// The child under `id` in `existing`, or a fresh instance from the
    /// registry. Either way the child ends up in this record's map.
    ///
    /// An existing child must have the registered kind.
    pub fn import_or_new(
        &self,
        existing: Option<&SharedValue>,
        id: FieldId,
    ) -> Result<SharedValue, RecordError> {
        let found = match existing {
            Some(existing) => existing.read().as_field_map()?.find(id).cloned(),
            None => None,
        };

        if let Some(child) = found {
            if let Some(registered) = self.registry.kind_of(id) {
                let actual = child.kind();
                if actual != registered {
                    return Err(ValueError::TypeMismatch {
                        actual,
                        requested: Requested::Kind(registered),
                    }
                    .into());
                }
            }
            if !existing.is_some_and(|e| e.ptr_eq(&self.node)) {
                self.node.write().as_field_map_mut()?.insert(id, child.clone());
            }
            trace!(id, "annealed existing child");
            return Ok(child);
        }

        let child = self.registry.instance_of(id)?;
        self.node.write().as_field_map_mut()?.insert(id, child.clone());
        Ok(child)
    }

    /// Resolve a `/`-separated path of field names below this record.
    pub fn get_child_path(&self, path: &str) -> Option<SharedValue> {
        tracker_path::get_path_str(&self.node, path, self.registry.as_ref())
    }
}

impl fmt::Debug for RecordBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBase")
            .field("node", &self.node)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
