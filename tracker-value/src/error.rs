//! Errors raised by typed access to a tracked value.

use core::fmt;

use crate::ValueKind;

/// What an accessor or operator needed the value to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Requested {
    /// One specific kind.
    Kind(ValueKind),
    /// Any integer or floating point kind.
    Numeric,
    /// Any integer kind.
    Integer,
    /// Any collection kind.
    Collection,
}

impl fmt::Display for Requested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requested::Kind(kind) => f.write_str(kind.name()),
            Requested::Numeric => f.write_str("numeric"),
            Requested::Integer => f.write_str("integer"),
            Requested::Collection => f.write_str("collection"),
        }
    }
}

/// Error returned by typed accessors, collection views and operators.
///
/// Every variant is a contract violation by the caller; nothing here is
/// expected during normal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueError {
    /// The value holds a different kind than the operation requires.
    TypeMismatch {
        /// Kind the value actually holds.
        actual: ValueKind,
        /// Kind (or family of kinds) the operation asked for.
        requested: Requested,
    },

    /// A sequence position past the end.
    IndexOutOfBounds {
        /// Position that was asked for.
        index: usize,
        /// Number of elements in the sequence.
        len: usize,
    },

    /// Ordering was asked of a kind that has none.
    NotComparable {
        /// The kind that cannot be ordered.
        kind: ValueKind,
    },
}

impl ValueError {
    pub(crate) fn mismatch(actual: ValueKind, requested: ValueKind) -> Self {
        ValueError::TypeMismatch {
            actual,
            requested: Requested::Kind(requested),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeMismatch { actual, requested } => {
                write!(
                    f,
                    "element type mismatch, is {actual} tried to use as {requested}"
                )
            }
            ValueError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for vector of {len}")
            }
            ValueError::NotComparable { kind } => {
                write!(f, "values of kind {kind} have no ordering")
            }
        }
    }
}

impl core::error::Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_both_kinds() {
        let err = ValueError::mismatch(ValueKind::String, ValueKind::UInt32);
        insta::assert_snapshot!(err.to_string(), @"element type mismatch, is string tried to use as uint32");
    }

    #[test]
    fn family_message() {
        let err = ValueError::TypeMismatch {
            actual: ValueKind::Mac,
            requested: Requested::Numeric,
        };
        insta::assert_snapshot!(err.to_string(), @"element type mismatch, is mac tried to use as numeric");
    }
}
