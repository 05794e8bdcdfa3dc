//! The closed set of payload shapes a [`TrackedValue`](crate::TrackedValue) can hold.
//!
//! # Wire codes
//!
//! Every kind carries a numeric code that binary serializers write out
//! directly. Codes are frozen: they are never reassigned or reused, and new
//! kinds are only ever appended after the last one.
//!
//! | Code | Kind | Code | Kind |
//! |------|------|------|------|
//! | 0  | `String` | 10 | `Double`    |
//! | 1  | `Int8`   | 11 | `Mac`       |
//! | 2  | `UInt8`  | 12 | `Uuid`      |
//! | 3  | `Int16`  | 13 | `Vector`    |
//! | 4  | `UInt16` | 14 | `Map`       |
//! | 5  | `Int32`  | 15 | `IntMap`    |
//! | 6  | `UInt32` | 16 | `MacMap`    |
//! | 7  | `Int64`  | 17 | `StringMap` |
//! | 8  | `UInt64` | 18 | `DoubleMap` |
//! | 9  | `Float`  | 19 | `ByteArray` |
//!
//! Code `-1` is reserved for "unassigned" and has no `ValueKind`.

use core::fmt;

/// Code reserved for an unassigned kind. [`ValueKind::from_code`] maps it to `None`.
pub const UNASSIGNED_KIND: i32 = -1;

/// Kind of payload held by a tracked value.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// UTF-8 text
    String = 0,
    /// Signed 8-bit integer
    Int8 = 1,
    /// Unsigned 8-bit integer
    UInt8 = 2,
    /// Signed 16-bit integer
    Int16 = 3,
    /// Unsigned 16-bit integer
    UInt16 = 4,
    /// Signed 32-bit integer
    Int32 = 5,
    /// Unsigned 32-bit integer
    UInt32 = 6,
    /// Signed 64-bit integer
    Int64 = 7,
    /// Unsigned 64-bit integer
    UInt64 = 8,
    /// Single precision float
    Float = 9,
    /// Double precision float
    Double = 10,
    /// Hardware (MAC) address
    Mac = 11,
    /// 128-bit unique identifier
    Uuid = 12,
    /// Ordered sequence of values
    Vector = 13,
    /// Field-id keyed multi-map (duplicate ids allowed)
    Map = 14,
    /// Integer keyed map
    IntMap = 15,
    /// MAC address keyed map
    MacMap = 16,
    /// String keyed map
    StringMap = 17,
    /// Double keyed map
    DoubleMap = 18,
    /// Byte blob
    ByteArray = 19,
}

impl ValueKind {
    /// Every kind, in code order.
    pub const ALL: [ValueKind; 20] = [
        ValueKind::String,
        ValueKind::Int8,
        ValueKind::UInt8,
        ValueKind::Int16,
        ValueKind::UInt16,
        ValueKind::Int32,
        ValueKind::UInt32,
        ValueKind::Int64,
        ValueKind::UInt64,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::Mac,
        ValueKind::Uuid,
        ValueKind::Vector,
        ValueKind::Map,
        ValueKind::IntMap,
        ValueKind::MacMap,
        ValueKind::StringMap,
        ValueKind::DoubleMap,
        ValueKind::ByteArray,
    ];

    /// The frozen wire code of this kind.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look a kind up by wire code. Unknown codes (including
    /// [`UNASSIGNED_KIND`]) return `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<ValueKind> {
        if code < 0 || code as usize >= Self::ALL.len() {
            return None;
        }
        Some(Self::ALL[code as usize])
    }

    /// Stable human-readable name, used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int8 => "int8",
            ValueKind::UInt8 => "uint8",
            ValueKind::Int16 => "int16",
            ValueKind::UInt16 => "uint16",
            ValueKind::Int32 => "int32",
            ValueKind::UInt32 => "uint32",
            ValueKind::Int64 => "int64",
            ValueKind::UInt64 => "uint64",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Mac => "mac",
            ValueKind::Uuid => "uuid",
            ValueKind::Vector => "vector",
            ValueKind::Map => "map",
            ValueKind::IntMap => "intmap",
            ValueKind::MacMap => "macmap",
            ValueKind::StringMap => "stringmap",
            ValueKind::DoubleMap => "doublemap",
            ValueKind::ByteArray => "bytearray",
        }
    }

    /// Returns `true` for the fixed-width integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ValueKind::Int8
                | ValueKind::UInt8
                | ValueKind::Int16
                | ValueKind::UInt16
                | ValueKind::Int32
                | ValueKind::UInt32
                | ValueKind::Int64
                | ValueKind::UInt64
        )
    }

    /// Returns `true` for kinds that support arithmetic (integers and floats).
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, ValueKind::Float | ValueKind::Double)
    }

    /// Returns `true` for kinds whose payload holds child values.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, ValueKind::Vector | ValueKind::Map) || self.is_keyed_map()
    }

    /// Returns `true` for the unique-keyed maps (int, mac, string, double).
    #[must_use]
    pub const fn is_keyed_map(self) -> bool {
        matches!(
            self,
            ValueKind::IntMap | ValueKind::MacMap | ValueKind::StringMap | ValueKind::DoubleMap
        )
    }

    /// Returns `true` for kinds that multi-path resolution fans out across:
    /// the sequence and the four keyed maps.
    #[must_use]
    pub const fn fans_out(self) -> bool {
        matches!(self, ValueKind::Vector) || self.is_keyed_map()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a kind by wire code, `"unassigned"` for `-1` and `"unknown"` for
/// anything else outside the table.
#[must_use]
pub fn type_to_string(code: i32) -> &'static str {
    match ValueKind::from_code(code) {
        Some(kind) => kind.name(),
        None if code == UNASSIGNED_KIND => "unassigned",
        None => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_frozen() {
        let expected = [
            (ValueKind::String, 0),
            (ValueKind::Int8, 1),
            (ValueKind::UInt8, 2),
            (ValueKind::Int16, 3),
            (ValueKind::UInt16, 4),
            (ValueKind::Int32, 5),
            (ValueKind::UInt32, 6),
            (ValueKind::Int64, 7),
            (ValueKind::UInt64, 8),
            (ValueKind::Float, 9),
            (ValueKind::Double, 10),
            (ValueKind::Mac, 11),
            (ValueKind::Uuid, 12),
            (ValueKind::Vector, 13),
            (ValueKind::Map, 14),
            (ValueKind::IntMap, 15),
            (ValueKind::MacMap, 16),
            (ValueKind::StringMap, 17),
            (ValueKind::DoubleMap, 18),
            (ValueKind::ByteArray, 19),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.code(), code, "{kind} changed its wire code");
            assert_eq!(ValueKind::from_code(code), Some(kind));
        }
    }

    #[test]
    fn all_table_matches_codes() {
        for (idx, kind) in ValueKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, idx);
        }
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(ValueKind::from_code(UNASSIGNED_KIND), None);
        assert_eq!(ValueKind::from_code(20), None);
        assert_eq!(type_to_string(-1), "unassigned");
        assert_eq!(type_to_string(99), "unknown");
        assert_eq!(type_to_string(17), "stringmap");
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = ValueKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ValueKind::ALL.len());
    }

    #[test]
    fn classification() {
        assert!(ValueKind::UInt64.is_integer());
        assert!(!ValueKind::Double.is_integer());
        assert!(ValueKind::Double.is_numeric());
        assert!(!ValueKind::String.is_numeric());
        assert!(ValueKind::Map.is_collection());
        assert!(!ValueKind::Map.fans_out());
        assert!(ValueKind::Vector.fans_out());
        assert!(ValueKind::DoubleMap.fans_out());
        assert!(!ValueKind::ByteArray.is_collection());
    }
}
