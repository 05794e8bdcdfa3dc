//! Ordering and equality between tracked values and scalars.

use core::cmp::Ordering;

use crate::{Payload, Scalar, TrackedValue, ValueError};

impl TrackedValue {
    /// Order this value against a scalar of its own kind.
    pub fn cmp_scalar<T: Scalar>(&self, rhs: &T) -> Result<Ordering, ValueError> {
        let lhs = self.get::<T>()?;
        lhs.partial_cmp(rhs)
            .ok_or(ValueError::NotComparable { kind: T::KIND })
    }

    /// `self == rhs` for a scalar of the same kind.
    pub fn eq_scalar<T: Scalar>(&self, rhs: &T) -> Result<bool, ValueError> {
        Ok(self.get::<T>()? == *rhs)
    }

    /// `self < rhs` for a scalar of the same kind.
    pub fn lt_scalar<T: Scalar>(&self, rhs: &T) -> Result<bool, ValueError> {
        Ok(self.get::<T>()? < *rhs)
    }

    /// `self > rhs` for a scalar of the same kind.
    pub fn gt_scalar<T: Scalar>(&self, rhs: &T) -> Result<bool, ValueError> {
        Ok(self.get::<T>()? > *rhs)
    }

    /// Order two values of the same kind by payload.
    ///
    /// Collections have no ordering and return [`ValueError::NotComparable`];
    /// `NaN` floats do the same.
    pub fn try_cmp(&self, other: &TrackedValue) -> Result<Ordering, ValueError> {
        let kind = self.kind();
        if kind != other.kind() {
            return Err(ValueError::mismatch(kind, other.kind()));
        }
        let ord = match (self.payload(), other.payload()) {
            (Payload::String(a), Payload::String(b)) => a.partial_cmp(b),
            (Payload::Int8(a), Payload::Int8(b)) => a.partial_cmp(b),
            (Payload::UInt8(a), Payload::UInt8(b)) => a.partial_cmp(b),
            (Payload::Int16(a), Payload::Int16(b)) => a.partial_cmp(b),
            (Payload::UInt16(a), Payload::UInt16(b)) => a.partial_cmp(b),
            (Payload::Int32(a), Payload::Int32(b)) => a.partial_cmp(b),
            (Payload::UInt32(a), Payload::UInt32(b)) => a.partial_cmp(b),
            (Payload::Int64(a), Payload::Int64(b)) => a.partial_cmp(b),
            (Payload::UInt64(a), Payload::UInt64(b)) => a.partial_cmp(b),
            (Payload::Float(a), Payload::Float(b)) => a.partial_cmp(b),
            (Payload::Double(a), Payload::Double(b)) => a.partial_cmp(b),
            (Payload::Mac(a), Payload::Mac(b)) => a.partial_cmp(b),
            (Payload::Uuid(a), Payload::Uuid(b)) => a.partial_cmp(b),
            (Payload::ByteArray(a), Payload::ByteArray(b)) => a.partial_cmp(b),
            _ => None,
        };
        ord.ok_or(ValueError::NotComparable { kind })
    }

    /// Compare two values of the same kind by payload.
    ///
    /// Collections return [`ValueError::NotComparable`], as in
    /// [`try_cmp`](Self::try_cmp). `NaN` is unequal to everything.
    pub fn try_eq(&self, other: &TrackedValue) -> Result<bool, ValueError> {
        let kind = self.kind();
        if kind != other.kind() {
            return Err(ValueError::mismatch(kind, other.kind()));
        }
        if kind.is_collection() {
            return Err(ValueError::NotComparable { kind });
        }
        Ok(self.payload() == other.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MacAddr, ValueKind};

    #[test]
    fn scalar_comparisons() {
        let v = TrackedValue::from(10i32);
        assert_eq!(v.cmp_scalar(&3i32), Ok(Ordering::Greater));
        assert_eq!(v.eq_scalar(&10i32), Ok(true));
        assert_eq!(v.lt_scalar(&11i32), Ok(true));
        assert_eq!(v.gt_scalar(&11i32), Ok(false));
        assert_eq!(
            v.lt_scalar(&11u32),
            Err(ValueError::mismatch(ValueKind::Int32, ValueKind::UInt32))
        );
    }

    #[test]
    fn value_to_value() {
        let a = TrackedValue::from(MacAddr::from_u64(1));
        let b = TrackedValue::from(MacAddr::from_u64(2));
        assert_eq!(a.try_cmp(&b), Ok(Ordering::Less));
        assert_eq!(a.try_eq(&a.clone()), Ok(true));

        let s = TrackedValue::from("x");
        assert!(a.try_cmp(&s).is_err());
    }

    #[test]
    fn collections_have_no_order() {
        let a = TrackedValue::new(ValueKind::Vector);
        let b = TrackedValue::new(ValueKind::Vector);
        assert_eq!(
            a.try_cmp(&b),
            Err(ValueError::NotComparable {
                kind: ValueKind::Vector
            })
        );
        assert_eq!(
            a.try_eq(&b),
            Err(ValueError::NotComparable {
                kind: ValueKind::Vector
            })
        );

        let m = TrackedValue::new(ValueKind::Map);
        assert_eq!(
            m.try_eq(&m.clone()),
            Err(ValueError::NotComparable { kind: ValueKind::Map })
        );
    }

    #[test]
    fn nan_is_not_comparable() {
        let v = TrackedValue::from(f64::NAN);
        assert!(v.cmp_scalar(&1.0f64).is_err());
        assert_eq!(v.eq_scalar(&1.0f64), Ok(false));
    }
}
