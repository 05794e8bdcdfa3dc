//! `tracker-value` provides the dynamically typed value tree that tracked
//! records are built from.
//!
//! # Overview
//!
//! - [`TrackedValue`]: one node. It has a [`ValueKind`] drawn from a closed set
//!   of twenty (integers of every width, floats, text, MAC addresses,
//!   identifiers, byte blobs, one sequence and five map kinds), a field id, and
//!   optionally a local name and a pre-serialize hook.
//! - [`SharedValue`]: a shared handle to a node. Containers, records and
//!   summaries all hold children through it, so the same node can appear in
//!   several trees without copying.
//! - Collection payloads: [`TrackedVector`], [`FieldMap`] (duplicate ids
//!   allowed) and the unique-keyed [`IntMap`], [`MacMap`], [`StringMap`] and
//!   [`DoubleMap`].
//!
//! # Kind checking
//!
//! Accessors never reinterpret a payload. Asking a `String` value for a `u32`
//! returns [`ValueError::TypeMismatch`]:
//!
//! ```
//! use tracker_value::{TrackedValue, ValueError, ValueKind};
//!
//! let mut packets = TrackedValue::from(5u32);
//! packets.add(3).unwrap();
//! assert_eq!(packets.get::<u32>(), Ok(8));
//!
//! let name = TrackedValue::from("beacon");
//! assert!(matches!(
//!     name.get::<u32>(),
//!     Err(ValueError::TypeMismatch { actual: ValueKind::String, .. })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]

extern crate alloc;

mod tracing_macros;

mod kind;
pub use kind::{UNASSIGNED_KIND, ValueKind, type_to_string};

mod error;
pub use error::{Requested, ValueError};

mod mac;
pub use mac::{MacAddr, MacParseError};

mod value;
pub use value::{FieldId, Payload, PreSerializeHook, TrackedValue, UNKNOWN_FIELD};

mod scalar;
pub use scalar::Scalar;

mod number;
pub use number::Number;

mod compare;

mod shared;
pub use shared::{SharedValue, ValueReadGuard, ValueWriteGuard};

mod vector;
pub use vector::TrackedVector;

pub mod field_map;
pub use field_map::FieldMap;

mod keyed_map;
pub use keyed_map::{DoubleMap, IntMap, KeyedMap, MacMap, StringMap};

pub use bytes::Bytes;
pub use ordered_float::OrderedFloat;
pub use uuid::Uuid;
