//! Errors returned by a field registry.

use core::fmt;

use tracker_value::{FieldId, ValueKind};

/// Error returned by [`FieldRegistry`](crate::FieldRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// A name was registered again with a different kind.
    Conflict {
        /// The field name.
        name: String,
        /// Kind the name was first registered with.
        registered: ValueKind,
        /// Kind the conflicting registration asked for.
        requested: ValueKind,
    },

    /// No field has been registered under this id.
    UnknownField {
        /// The id that was looked up.
        id: FieldId,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Conflict {
                name,
                registered,
                requested,
            } => write!(
                f,
                "field {name:?} is registered as {registered}, cannot register it as {requested}"
            ),
            RegistryError::UnknownField { id } => write!(f, "no field registered with id {id}"),
        }
    }
}

impl core::error::Error for RegistryError {}
