//! Kind checking across the whole kind table.

use std::fmt::Debug;

use tracker_testhelpers::{IPanic, setup};
use tracker_value::{
    MacAddr, Payload, Requested, Scalar, TrackedValue, UNKNOWN_FIELD, Uuid, ValueError, ValueKind,
};

#[test]
fn u32_access_fails_on_every_other_kind() {
    setup();
    for kind in ValueKind::ALL {
        let v = TrackedValue::new(kind);
        let got = v.get::<u32>();
        if kind == ValueKind::UInt32 {
            assert_eq!(got, Ok(0));
        } else {
            assert_eq!(
                got,
                Err(ValueError::TypeMismatch {
                    actual: kind,
                    requested: Requested::Kind(ValueKind::UInt32),
                }),
                "{kind} must not read as uint32"
            );
        }
    }
}

#[test]
fn collection_views_fail_on_scalars() {
    setup();
    let v = TrackedValue::from(1.5f32);
    assert!(v.as_vector().is_err());
    assert!(v.as_field_map().is_err());
    assert!(v.as_int_map().is_err());
    assert!(v.as_mac_map().is_err());
    assert!(v.as_string_map().is_err());
    assert!(v.as_double_map().is_err());
    assert_eq!(
        v.len(),
        Err(ValueError::TypeMismatch {
            actual: ValueKind::Float,
            requested: Requested::Collection,
        })
    );
}

#[test]
fn scalar_round_trips() -> Result<(), IPanic> {
    setup();
    let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse()?;
    let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

    let mut v = TrackedValue::new(ValueKind::Mac);
    v.set(mac)?;
    assert_eq!(v.get::<MacAddr>()?, mac);

    v.retag(ValueKind::Uuid);
    assert_eq!(v.get::<Uuid>()?, Uuid::nil());
    v.set(id)?;
    assert_eq!(v.get::<Uuid>()?, id);

    assert_eq!(
        v.set(-7i64),
        Err(ValueError::TypeMismatch {
            actual: ValueKind::Uuid,
            requested: Requested::Kind(ValueKind::Int64),
        })
    );
    assert_eq!(v.get::<Uuid>()?, id, "a rejected set leaves the value alone");

    v.retag(ValueKind::Int64);
    v.set(-7i64)?;
    assert_eq!(v.get::<i64>()?, -7);
    Ok(())
}

/// Every kind except `T::KIND` rejects both reads and writes of `T`; the
/// matching kind stores `sample` and hands it back.
fn sweep<T: Scalar + Clone + Debug>(sample: T) {
    for kind in ValueKind::ALL {
        let mut v = TrackedValue::new(kind);
        let mismatch = ValueError::TypeMismatch {
            actual: kind,
            requested: Requested::Kind(T::KIND),
        };
        if kind == T::KIND {
            assert!(v.get::<T>().is_ok(), "{kind} must read as itself");
            assert_eq!(v.set(sample.clone()), Ok(()));
            let got = v.get::<T>();
            assert!(
                matches!(&got, Ok(back) if *back == sample),
                "{kind}: wrote {sample:?}, read {got:?}"
            );
        } else {
            assert_eq!(v.get::<T>().err(), Some(mismatch.clone()), "{kind} read as {}", T::KIND);
            assert_eq!(v.set(sample.clone()), Err(mismatch), "{kind} written as {}", T::KIND);
            assert_eq!(v.kind(), kind);
        }
    }
}

#[test]
fn every_scalar_type_is_checked_against_every_kind() -> Result<(), IPanic> {
    setup();
    sweep(-8i8);
    sweep(200u8);
    sweep(-16_000i16);
    sweep(60_000u16);
    sweep(-2_000_000i32);
    sweep(4_000_000_000u32);
    sweep(i64::MIN);
    sweep(u64::MAX);
    sweep(0.25f32);
    sweep(-1.5e300f64);
    sweep(String::from("ssid"));
    sweep("aa:bb:cc:dd:ee:ff".parse::<MacAddr>()?);
    sweep(Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef));
    Ok(())
}

#[test]
fn fresh_values_are_unbound() {
    setup();
    let v = TrackedValue::from(Payload::Double(2.0));
    assert_eq!(v.id(), UNKNOWN_FIELD);
    assert_eq!(v.local_name(), None);
    assert!(!v.has_pre_serialize_hook());
}

#[test]
fn mismatch_message() {
    setup();
    let err = TrackedValue::from("ssid").get::<u32>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"element type mismatch, is string tried to use as uint32");
}
