//! Typed access to scalar payloads.
//!
//! [`Scalar`] ties a Rust type to the [`ValueKind`] it is stored as, so that
//! [`TrackedValue::get`](crate::TrackedValue::get) and
//! [`TrackedValue::set`](crate::TrackedValue::set) can check the kind once and
//! move the payload in or out without any reinterpretation.

use uuid::Uuid;

use crate::{MacAddr, Payload, TrackedValue, ValueKind};

/// A Rust type that maps onto exactly one scalar [`ValueKind`].
pub trait Scalar: Sized + PartialOrd {
    /// The kind this type is stored as.
    const KIND: ValueKind;

    /// Copy the payload out, or `None` if it holds another kind.
    fn from_payload(payload: &Payload) -> Option<Self>;

    /// Wrap the value into its payload variant.
    fn into_payload(self) -> Payload;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn from_payload(payload: &Payload) -> Option<Self> {
                    match payload {
                        Payload::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn into_payload(self) -> Payload {
                    Payload::$variant(self)
                }
            }

            impl From<$ty> for Payload {
                fn from(v: $ty) -> Self {
                    Payload::$variant(v)
                }
            }

            impl From<$ty> for TrackedValue {
                fn from(v: $ty) -> Self {
                    TrackedValue::from_payload(Payload::$variant(v))
                }
            }
        )*
    };
}

impl_scalar! {
    String => String,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    MacAddr => Mac,
    Uuid => Uuid,
}

impl From<&str> for Payload {
    fn from(v: &str) -> Self {
        Payload::String(v.to_owned())
    }
}

impl From<&str> for TrackedValue {
    fn from(v: &str) -> Self {
        TrackedValue::from_payload(Payload::String(v.to_owned()))
    }
}
