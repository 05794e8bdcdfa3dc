//! Best-effort arithmetic on numeric payloads.
//!
//! The right-hand side of every operator is a [`Number`], which is converted
//! to the kind of the value it is applied to: integer kinds wrap on overflow
//! and truncate wider operands, float kinds take the operand as a float.
//! Bitwise operators only apply to integer kinds.

use crate::error::Requested;
use crate::{Payload, TrackedValue, ValueError};

/// Operand for arithmetic on a tracked value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    /// Signed integer operand
    Signed(i64),
    /// Unsigned integer operand
    Unsigned(u64),
    /// Floating point operand
    Float(f64),
}

impl Number {
    fn to_i64(self) -> i64 {
        match self {
            Number::Signed(v) => v,
            Number::Unsigned(v) => v as i64,
            Number::Float(v) => v as i64,
        }
    }

    fn to_u64(self) -> u64 {
        match self {
            Number::Signed(v) => v as u64,
            Number::Unsigned(v) => v,
            Number::Float(v) => v as u64,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Number::Signed(v) => v as f64,
            Number::Unsigned(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(v: $ty) -> Self {
                    Number::$variant(v as $wide)
                }
            }
        )*
    };
}

impl_from_number!(Signed as i64: i8, i16, i32, i64, isize);
impl_from_number!(Unsigned as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f32, f64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Or,
    And,
    Xor,
}

impl Op {
    const fn is_bitwise(self) -> bool {
        matches!(self, Op::Or | Op::And | Op::Xor)
    }
}

impl TrackedValue {
    fn combine(&mut self, rhs: Number, op: Op) -> Result<(), ValueError> {
        let kind = self.kind();

        macro_rules! int {
            ($v:ident, $ty:ty, $conv:ident) => {{
                let r = rhs.$conv() as $ty;
                *$v = match op {
                    Op::Add => $v.wrapping_add(r),
                    Op::Sub => $v.wrapping_sub(r),
                    Op::Or => *$v | r,
                    Op::And => *$v & r,
                    Op::Xor => *$v ^ r,
                };
                Ok(())
            }};
        }

        macro_rules! float {
            ($v:ident, $ty:ty) => {{
                let r = rhs.to_f64() as $ty;
                match op {
                    Op::Add => *$v += r,
                    Op::Sub => *$v -= r,
                    Op::Or | Op::And | Op::Xor => {
                        return Err(ValueError::TypeMismatch {
                            actual: kind,
                            requested: Requested::Integer,
                        });
                    }
                }
                Ok(())
            }};
        }

        match self.payload_mut() {
            Payload::Int8(v) => int!(v, i8, to_i64),
            Payload::UInt8(v) => int!(v, u8, to_u64),
            Payload::Int16(v) => int!(v, i16, to_i64),
            Payload::UInt16(v) => int!(v, u16, to_u64),
            Payload::Int32(v) => int!(v, i32, to_i64),
            Payload::UInt32(v) => int!(v, u32, to_u64),
            Payload::Int64(v) => int!(v, i64, to_i64),
            Payload::UInt64(v) => int!(v, u64, to_u64),
            Payload::Float(v) => float!(v, f32),
            Payload::Double(v) => float!(v, f64),
            _ => Err(ValueError::TypeMismatch {
                actual: kind,
                requested: if op.is_bitwise() {
                    Requested::Integer
                } else {
                    Requested::Numeric
                },
            }),
        }
    }

    /// Compound addition (`+=`).
    pub fn add(&mut self, rhs: impl Into<Number>) -> Result<(), ValueError> {
        self.combine(rhs.into(), Op::Add)
    }

    /// Compound subtraction (`-=`).
    pub fn sub(&mut self, rhs: impl Into<Number>) -> Result<(), ValueError> {
        self.combine(rhs.into(), Op::Sub)
    }

    /// Add one (`++`).
    pub fn increment(&mut self) -> Result<(), ValueError> {
        self.combine(Number::Unsigned(1), Op::Add)
    }

    /// Subtract one (`--`).
    pub fn decrement(&mut self) -> Result<(), ValueError> {
        self.combine(Number::Unsigned(1), Op::Sub)
    }

    /// Compound bitwise or (`|=`). Integer kinds only.
    pub fn bit_or(&mut self, rhs: impl Into<Number>) -> Result<(), ValueError> {
        self.combine(rhs.into(), Op::Or)
    }

    /// Compound bitwise and (`&=`). Integer kinds only.
    pub fn bit_and(&mut self, rhs: impl Into<Number>) -> Result<(), ValueError> {
        self.combine(rhs.into(), Op::And)
    }

    /// Compound bitwise xor (`^=`). Integer kinds only.
    pub fn bit_xor(&mut self, rhs: impl Into<Number>) -> Result<(), ValueError> {
        self.combine(rhs.into(), Op::Xor)
    }

    /// Set every bit of `mask`.
    pub fn bitset(&mut self, mask: u64) -> Result<(), ValueError> {
        self.bit_or(mask)
    }

    /// Clear every bit of `mask`.
    pub fn bitclear(&mut self, mask: u64) -> Result<(), ValueError> {
        self.bit_and(!mask)
    }

    /// Returns `true` if any bit of `mask` is set.
    pub fn bitcheck(&self, mask: u64) -> Result<bool, ValueError> {
        let bits = match self.payload() {
            Payload::Int8(v) => *v as u64,
            Payload::UInt8(v) => *v as u64,
            Payload::Int16(v) => *v as u64,
            Payload::UInt16(v) => *v as u64,
            Payload::Int32(v) => *v as u64,
            Payload::UInt32(v) => *v as u64,
            Payload::Int64(v) => *v as u64,
            Payload::UInt64(v) => *v,
            _ => {
                return Err(ValueError::TypeMismatch {
                    actual: self.kind(),
                    requested: Requested::Integer,
                });
            }
        };
        Ok(bits & mask != 0)
    }
}
