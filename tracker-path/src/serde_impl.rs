//! `serde::Serialize` bridge for tracked value trees.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracker_registry::FieldRegistry;
use tracker_value::{Payload, SharedValue};

use crate::RenameMap;
use crate::summary::refresh_for_serialize;

/// A tree ready to hand to any serde serializer.
///
/// Scalars serialize as themselves (MAC addresses and UUIDs as strings, byte
/// arrays as bytes), vectors as sequences, and every map kind as a map. A
/// field-map entry is keyed by, in order of preference: its rename from
/// `renames`, its local name, its registered name, and finally its numeric
/// id. Pre-serialize hooks run on each node before it is read; a node bound
/// in `renames` refreshes its whole summary path first.
pub struct SerializeTree<'a> {
    node: &'a SharedValue,
    registry: &'a dyn FieldRegistry,
    renames: Option<&'a RenameMap>,
    parent: Option<&'a SerializeTree<'a>>,
}

impl<'a> SerializeTree<'a> {
    /// Serialize `node`, naming fields through `registry`.
    pub fn new(node: &'a SharedValue, registry: &'a dyn FieldRegistry) -> Self {
        SerializeTree {
            node,
            registry,
            renames: None,
            parent: None,
        }
    }

    /// Apply `renames` to bound nodes.
    pub fn with_renames(mut self, renames: &'a RenameMap) -> Self {
        self.renames = Some(renames);
        self
    }

    fn child<'b>(&'b self, node: &'b SharedValue) -> SerializeTree<'b> {
        SerializeTree {
            node,
            registry: self.registry,
            renames: self.renames,
            parent: Some(self),
        }
    }

    /// Returns `true` if `node` is being serialized further up, and so is
    /// read-locked by this thread.
    fn is_enclosing(&self, node: &SharedValue) -> bool {
        let mut current = self.parent;
        while let Some(tree) = current {
            if tree.node.ptr_eq(node) {
                return true;
            }
            current = tree.parent;
        }
        false
    }

    fn key_of(&self, node: &SharedValue) -> String {
        if let Some(rename) = self.renames.and_then(|r| r.rename_of(node)) {
            return rename.to_owned();
        }
        let value = node.read();
        if let Some(local) = value.local_name() {
            return local.to_owned();
        }
        self.registry
            .name_of(value.id())
            .unwrap_or_else(|| value.id().to_string())
    }
}

impl Serialize for SerializeTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        refresh_for_serialize(self.node, self.renames, &|n| self.is_enclosing(n));
        let value = self.node.read();
        match value.payload() {
            Payload::String(v) => serializer.serialize_str(v),
            Payload::Int8(v) => serializer.serialize_i8(*v),
            Payload::UInt8(v) => serializer.serialize_u8(*v),
            Payload::Int16(v) => serializer.serialize_i16(*v),
            Payload::UInt16(v) => serializer.serialize_u16(*v),
            Payload::Int32(v) => serializer.serialize_i32(*v),
            Payload::UInt32(v) => serializer.serialize_u32(*v),
            Payload::Int64(v) => serializer.serialize_i64(*v),
            Payload::UInt64(v) => serializer.serialize_u64(*v),
            Payload::Float(v) => serializer.serialize_f32(*v),
            Payload::Double(v) => serializer.serialize_f64(*v),
            Payload::Mac(v) => serializer.collect_str(v),
            Payload::Uuid(v) => serializer.collect_str(v),
            Payload::ByteArray(v) => serializer.serialize_bytes(v),
            Payload::Vector(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Payload::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (_, child) in fields {
                    map.serialize_entry(&self.key_of(child), &self.child(child))?;
                }
                map.end()
            }
            Payload::IntMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, child) in entries {
                    map.serialize_entry(k, &self.child(child))?;
                }
                map.end()
            }
            Payload::MacMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, child) in entries {
                    map.serialize_entry(&k.to_string(), &self.child(child))?;
                }
                map.end()
            }
            Payload::StringMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, child) in entries {
                    map.serialize_entry(k, &self.child(child))?;
                }
                map.end()
            }
            Payload::DoubleMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, child) in entries {
                    map.serialize_entry(&k.0.to_string(), &self.child(child))?;
                }
                map.end()
            }
        }
    }
}
