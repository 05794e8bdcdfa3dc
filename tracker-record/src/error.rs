use core::fmt;

use tracker_registry::RegistryError;
use tracker_value::ValueError;

/// Error returned while building a record or using one of its slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    /// A slot was used before the record reserved its fields.
    NotReserved,

    /// A field name that the record's table never registered.
    Unregistered {
        /// The field name.
        field: String,
    },

    /// Typed access to a bound value failed.
    Value(ValueError),

    /// The registry refused a registration or lookup.
    Registry(RegistryError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotReserved => f.write_str("record field used before it was reserved"),
            RecordError::Unregistered { field } => {
                write!(f, "field {field:?} is not declared by this record")
            }
            RecordError::Value(err) => write!(f, "{err}"),
            RecordError::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            RecordError::Value(err) => Some(err),
            RecordError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValueError> for RecordError {
    fn from(err: ValueError) -> Self {
        RecordError::Value(err)
    }
}

impl From<RegistryError> for RecordError {
    fn from(err: RegistryError) -> Self {
        RecordError::Registry(err)
    }
}
