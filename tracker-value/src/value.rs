//! The tracked value itself.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use bytes::Bytes;
use uuid::Uuid;

use crate::error::Requested;
use crate::tracing_macros::trace;
use crate::{
    DoubleMap, FieldMap, IntMap, MacAddr, MacMap, Scalar, SharedValue, StringMap, TrackedVector,
    ValueError, ValueKind,
};

/// Numeric field id assigned by a field registry. The same id always names
/// the same field (and the same kind) for the lifetime of the registry.
pub type FieldId = i32;

/// Id of a value that has not been bound to a registered field.
pub const UNKNOWN_FIELD: FieldId = -1;

/// Callback run on a value just before it is serialized.
pub type PreSerializeHook = Arc<dyn Fn(&mut TrackedValue) + Send + Sync>;

/// The payload of a tracked value, one variant per [`ValueKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// See [`ValueKind::String`].
    String(String),
    /// See [`ValueKind::Int8`].
    Int8(i8),
    /// See [`ValueKind::UInt8`].
    UInt8(u8),
    /// See [`ValueKind::Int16`].
    Int16(i16),
    /// See [`ValueKind::UInt16`].
    UInt16(u16),
    /// See [`ValueKind::Int32`].
    Int32(i32),
    /// See [`ValueKind::UInt32`].
    UInt32(u32),
    /// See [`ValueKind::Int64`].
    Int64(i64),
    /// See [`ValueKind::UInt64`].
    UInt64(u64),
    /// See [`ValueKind::Float`].
    Float(f32),
    /// See [`ValueKind::Double`].
    Double(f64),
    /// See [`ValueKind::Mac`].
    Mac(MacAddr),
    /// See [`ValueKind::Uuid`].
    Uuid(Uuid),
    /// See [`ValueKind::Vector`].
    Vector(TrackedVector),
    /// See [`ValueKind::Map`].
    Map(FieldMap),
    /// See [`ValueKind::IntMap`].
    IntMap(IntMap),
    /// See [`ValueKind::MacMap`].
    MacMap(MacMap),
    /// See [`ValueKind::StringMap`].
    StringMap(StringMap),
    /// See [`ValueKind::DoubleMap`].
    DoubleMap(DoubleMap),
    /// See [`ValueKind::ByteArray`].
    ByteArray(Bytes),
}

impl Payload {
    /// The default payload of `kind`: zero, empty text, nil address and
    /// identifier, or an empty collection.
    pub fn default_for(kind: ValueKind) -> Payload {
        match kind {
            ValueKind::String => Payload::String(String::new()),
            ValueKind::Int8 => Payload::Int8(0),
            ValueKind::UInt8 => Payload::UInt8(0),
            ValueKind::Int16 => Payload::Int16(0),
            ValueKind::UInt16 => Payload::UInt16(0),
            ValueKind::Int32 => Payload::Int32(0),
            ValueKind::UInt32 => Payload::UInt32(0),
            ValueKind::Int64 => Payload::Int64(0),
            ValueKind::UInt64 => Payload::UInt64(0),
            ValueKind::Float => Payload::Float(0.0),
            ValueKind::Double => Payload::Double(0.0),
            ValueKind::Mac => Payload::Mac(MacAddr::ZERO),
            ValueKind::Uuid => Payload::Uuid(Uuid::nil()),
            ValueKind::Vector => Payload::Vector(TrackedVector::new()),
            ValueKind::Map => Payload::Map(FieldMap::new()),
            ValueKind::IntMap => Payload::IntMap(IntMap::new()),
            ValueKind::MacMap => Payload::MacMap(MacMap::new()),
            ValueKind::StringMap => Payload::StringMap(StringMap::new()),
            ValueKind::DoubleMap => Payload::DoubleMap(DoubleMap::new()),
            ValueKind::ByteArray => Payload::ByteArray(Bytes::new()),
        }
    }

    /// The kind this payload belongs to.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Payload::String(_) => ValueKind::String,
            Payload::Int8(_) => ValueKind::Int8,
            Payload::UInt8(_) => ValueKind::UInt8,
            Payload::Int16(_) => ValueKind::Int16,
            Payload::UInt16(_) => ValueKind::UInt16,
            Payload::Int32(_) => ValueKind::Int32,
            Payload::UInt32(_) => ValueKind::UInt32,
            Payload::Int64(_) => ValueKind::Int64,
            Payload::UInt64(_) => ValueKind::UInt64,
            Payload::Float(_) => ValueKind::Float,
            Payload::Double(_) => ValueKind::Double,
            Payload::Mac(_) => ValueKind::Mac,
            Payload::Uuid(_) => ValueKind::Uuid,
            Payload::Vector(_) => ValueKind::Vector,
            Payload::Map(_) => ValueKind::Map,
            Payload::IntMap(_) => ValueKind::IntMap,
            Payload::MacMap(_) => ValueKind::MacMap,
            Payload::StringMap(_) => ValueKind::StringMap,
            Payload::DoubleMap(_) => ValueKind::DoubleMap,
            Payload::ByteArray(_) => ValueKind::ByteArray,
        }
    }
}

/// A dynamically typed, self-describing value.
///
/// Every value carries:
///
/// - a field id (or [`UNKNOWN_FIELD`]) naming which registered field it is,
/// - an optional local name that serializers may prefer over the registered one,
/// - an optional pre-serialize hook,
/// - a [`Payload`] whose variant is the value's [`ValueKind`].
///
/// Typed accessors check the kind and return [`ValueError::TypeMismatch`]
/// rather than reinterpreting the payload. Collections hold their children as
/// [`SharedValue`] handles, so a child can live in several containers at once.
#[derive(Clone)]
pub struct TrackedValue {
    id: FieldId,
    local_name: Option<String>,
    hook: Option<PreSerializeHook>,
    payload: Payload,
}

impl TrackedValue {
    /// A value of `kind` with its default payload and no field id.
    pub fn new(kind: ValueKind) -> Self {
        Self::with_id(kind, UNKNOWN_FIELD)
    }

    /// A value of `kind` with its default payload, tagged with `id`.
    pub fn with_id(kind: ValueKind, id: FieldId) -> Self {
        TrackedValue {
            id,
            local_name: None,
            hook: None,
            payload: Payload::default_for(kind),
        }
    }

    /// A value holding `payload`, with no field id.
    pub fn from_payload(payload: impl Into<Payload>) -> Self {
        TrackedValue {
            id: UNKNOWN_FIELD,
            local_name: None,
            hook: None,
            payload: payload.into(),
        }
    }

    /// Kind of the payload.
    pub const fn kind(&self) -> ValueKind {
        self.payload.kind()
    }

    /// Field id, or [`UNKNOWN_FIELD`].
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Retag with a new field id.
    pub fn set_id(&mut self, id: FieldId) {
        self.id = id;
    }

    /// Name this value should be serialized under instead of its registered
    /// field name.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    /// Set the local name.
    pub fn set_local_name(&mut self, name: impl Into<String>) {
        self.local_name = Some(name.into());
    }

    /// Remove the local name.
    pub fn clear_local_name(&mut self) {
        self.local_name = None;
    }

    /// The raw payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The raw payload, mutably. Callers must keep the variant unchanged.
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Consume the value, keeping only its payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Change kind, resetting the payload to the new kind's default. Id,
    /// local name and hook are kept. Retagging to the current kind is a no-op.
    pub fn retag(&mut self, kind: ValueKind) {
        if self.kind() == kind {
            return;
        }
        trace!(id = self.id, from = %self.kind(), to = %kind, "retag");
        self.payload = Payload::default_for(kind);
    }

    /// A fresh value of the same kind, id, local name and hook, with a
    /// default payload. Collections come back empty.
    pub fn clone_type(&self) -> TrackedValue {
        TrackedValue {
            id: self.id,
            local_name: self.local_name.clone(),
            hook: self.hook.clone(),
            payload: Payload::default_for(self.kind()),
        }
    }

    /// Like [`clone_type`](Self::clone_type), tagged with `id` instead.
    pub fn clone_type_with_id(&self, id: FieldId) -> TrackedValue {
        let mut value = self.clone_type();
        value.id = id;
        value
    }

    /// Install the hook run by [`pre_serialize`](Self::pre_serialize).
    pub fn set_pre_serialize_hook(&mut self, hook: PreSerializeHook) {
        self.hook = Some(hook);
    }

    /// Remove the pre-serialize hook.
    pub fn clear_pre_serialize_hook(&mut self) {
        self.hook = None;
    }

    /// Returns `true` if a pre-serialize hook is installed.
    pub fn has_pre_serialize_hook(&self) -> bool {
        self.hook.is_some()
    }

    /// Run the pre-serialize hook, if any. Serializers call this on every
    /// node immediately before emitting it.
    pub fn pre_serialize(&mut self) {
        if let Some(hook) = self.hook.clone() {
            trace!(id = self.id, kind = %self.kind(), "pre-serialize hook");
            hook(self);
        }
    }

    fn mismatch(&self, requested: ValueKind) -> ValueError {
        ValueError::mismatch(self.kind(), requested)
    }

    /// Read a scalar. The requested type must match the kind exactly.
    pub fn get<T: Scalar>(&self) -> Result<T, ValueError> {
        T::from_payload(&self.payload).ok_or_else(|| self.mismatch(T::KIND))
    }

    /// Overwrite a scalar. The value must already be of the matching kind;
    /// use [`retag`](Self::retag) to change it.
    pub fn set<T: Scalar>(&mut self, v: T) -> Result<(), ValueError> {
        if self.kind() != T::KIND {
            return Err(self.mismatch(T::KIND));
        }
        self.payload = v.into_payload();
        Ok(())
    }

    /// Overwrite a string value from a borrowed `str`.
    pub fn set_str(&mut self, v: &str) -> Result<(), ValueError> {
        match &mut self.payload {
            Payload::String(s) => {
                s.clear();
                s.push_str(v);
                Ok(())
            }
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    /// Borrow a string value.
    pub fn as_str(&self) -> Result<&str, ValueError> {
        match &self.payload {
            Payload::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    /// Borrow a byte-array value.
    pub fn as_bytes(&self) -> Result<&[u8], ValueError> {
        match &self.payload {
            Payload::ByteArray(b) => Ok(b),
            _ => Err(self.mismatch(ValueKind::ByteArray)),
        }
    }

    /// A cheap shared handle to a byte-array value's contents.
    pub fn shared_bytes(&self) -> Result<Bytes, ValueError> {
        match &self.payload {
            Payload::ByteArray(b) => Ok(b.clone()),
            _ => Err(self.mismatch(ValueKind::ByteArray)),
        }
    }

    /// Length of a byte-array value.
    pub fn bytes_len(&self) -> Result<usize, ValueError> {
        self.as_bytes().map(<[u8]>::len)
    }

    /// Overwrite a byte-array value, copying `data`.
    pub fn set_bytes(&mut self, data: &[u8]) -> Result<(), ValueError> {
        self.set_shared_bytes(Bytes::copy_from_slice(data))
    }

    /// Overwrite a byte-array value, taking `data` without copying.
    pub fn set_shared_bytes(&mut self, data: impl Into<Bytes>) -> Result<(), ValueError> {
        match &mut self.payload {
            Payload::ByteArray(b) => {
                *b = data.into();
                Ok(())
            }
            _ => Err(self.mismatch(ValueKind::ByteArray)),
        }
    }

    /// Number of children in a collection, or bytes in a byte array.
    pub fn len(&self) -> Result<usize, ValueError> {
        match &self.payload {
            Payload::Vector(v) => Ok(v.len()),
            Payload::Map(m) => Ok(m.len()),
            Payload::IntMap(m) => Ok(m.len()),
            Payload::MacMap(m) => Ok(m.len()),
            Payload::StringMap(m) => Ok(m.len()),
            Payload::DoubleMap(m) => Ok(m.len()),
            Payload::ByteArray(b) => Ok(b.len()),
            _ => Err(ValueError::TypeMismatch {
                actual: self.kind(),
                requested: Requested::Collection,
            }),
        }
    }

    /// Returns `Ok(true)` if a collection or byte array is empty.
    pub fn is_empty(&self) -> Result<bool, ValueError> {
        self.len().map(|n| n == 0)
    }

    /// Child lookup by integer: the `index`th element of a vector, or the
    /// first entry under field id `index` of a field map.
    ///
    /// A vector index past the end is [`ValueError::IndexOutOfBounds`]; a
    /// missing field id is `Ok(None)`.
    pub fn index(&self, index: i64) -> Result<Option<SharedValue>, ValueError> {
        match &self.payload {
            Payload::Vector(v) => {
                let pos = usize::try_from(index).map_err(|_| ValueError::IndexOutOfBounds {
                    index: usize::MAX,
                    len: v.len(),
                })?;
                v.get(pos)
                    .cloned()
                    .map(Some)
                    .ok_or(ValueError::IndexOutOfBounds {
                        index: pos,
                        len: v.len(),
                    })
            }
            Payload::Map(m) => Ok(FieldId::try_from(index)
                .ok()
                .and_then(|id| m.find(id))
                .cloned()),
            Payload::IntMap(m) => Ok(m.get(&index).cloned()),
            _ => Err(ValueError::TypeMismatch {
                actual: self.kind(),
                requested: Requested::Collection,
            }),
        }
    }

    /// Child lookup in a MAC-keyed map.
    pub fn index_mac(&self, key: MacAddr) -> Result<Option<SharedValue>, ValueError> {
        Ok(self.as_mac_map()?.get(&key).cloned())
    }

    /// Shallow copies of a collection's children handles, in iteration
    /// order. Keyed maps yield their values.
    pub fn children(&self) -> Result<Vec<SharedValue>, ValueError> {
        Ok(match &self.payload {
            Payload::Vector(v) => v.to_vec(),
            Payload::Map(m) => m.values().cloned().collect(),
            Payload::IntMap(m) => m.values().cloned().collect(),
            Payload::MacMap(m) => m.values().cloned().collect(),
            Payload::StringMap(m) => m.values().cloned().collect(),
            Payload::DoubleMap(m) => m.values().cloned().collect(),
            _ => {
                return Err(ValueError::TypeMismatch {
                    actual: self.kind(),
                    requested: Requested::Collection,
                });
            }
        })
    }
}

macro_rules! collection_views {
    ($($variant:ident: $ty:ty => $as:ident, $as_mut:ident;)*) => {
        impl TrackedValue {
            $(
                #[doc = concat!("View as a [`", stringify!($ty), "`].")]
                pub fn $as(&self) -> Result<&$ty, ValueError> {
                    match &self.payload {
                        Payload::$variant(c) => Ok(c),
                        _ => Err(self.mismatch(ValueKind::$variant)),
                    }
                }

                #[doc = concat!("Mutable view as a [`", stringify!($ty), "`].")]
                pub fn $as_mut(&mut self) -> Result<&mut $ty, ValueError> {
                    let kind = self.kind();
                    match &mut self.payload {
                        Payload::$variant(c) => Ok(c),
                        _ => Err(ValueError::mismatch(kind, ValueKind::$variant)),
                    }
                }
            )*
        }
    };
}

collection_views! {
    Vector: TrackedVector => as_vector, as_vector_mut;
    Map: FieldMap => as_field_map, as_field_map_mut;
    IntMap: IntMap => as_int_map, as_int_map_mut;
    MacMap: MacMap => as_mac_map, as_mac_map_mut;
    StringMap: StringMap => as_string_map, as_string_map_mut;
    DoubleMap: DoubleMap => as_double_map, as_double_map_mut;
}

impl From<Payload> for TrackedValue {
    fn from(payload: Payload) -> Self {
        TrackedValue::from_payload(payload)
    }
}

impl PartialEq for TrackedValue {
    /// Compares id, local name and payload (children by content). Hooks are
    /// not compared.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.local_name == other.local_name && self.payload == other.payload
    }
}

impl fmt::Debug for TrackedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TrackedValue");
        s.field("id", &self.id);
        if let Some(name) = &self.local_name {
            s.field("local_name", name);
        }
        if self.hook.is_some() {
            s.field("hook", &"<fn>");
        }
        s.field("payload", &self.payload).finish()
    }
}
