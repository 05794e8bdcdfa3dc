//! Field registry for tracked value trees.
//!
//! Records address their children by numeric [`FieldId`]. A [`FieldRegistry`]
//! maps the human-readable field name (`"dot11.device.last_beacon"`) to that
//! id, remembers each field's kind and description, and builds new instances
//! of it on demand.
//!
//! The registry is passed explicitly as a [`SharedRegistry`] handle to every
//! constructor that needs it; nothing here is global.
//!
//! ```
//! use std::sync::Arc;
//! use tracker_registry::{EntryTracker, FieldRegistry, SharedRegistry};
//! use tracker_value::ValueKind;
//!
//! let registry: SharedRegistry = Arc::new(EntryTracker::new());
//! let id = registry
//!     .resolve_or_create("device.packets", ValueKind::UInt64, "packets seen")
//!     .unwrap();
//! assert_eq!(registry.name_of(id).as_deref(), Some("device.packets"));
//! assert_eq!(registry.instance_of(id).unwrap().kind(), ValueKind::UInt64);
//! ```

#![warn(missing_docs)]

use std::sync::Arc;

use tracker_value::{FieldId, SharedValue, ValueKind};

mod tracing_macros;

mod error;
pub use error::RegistryError;

mod builder;
pub use builder::ElementBuilder;

mod entry_tracker;
pub use entry_tracker::EntryTracker;

pub use tracker_value::UNKNOWN_FIELD;

/// Directory of registered fields: name, id, kind, description and builder.
///
/// For a given name the returned id is deterministic for the lifetime of the
/// registry. Implementations must be safe to share between threads.
pub trait FieldRegistry: Send + Sync {
    /// Id of `name`, registering it with `kind` if it is new. Registering an
    /// existing name with a different kind is a [`RegistryError::Conflict`].
    fn resolve_or_create(
        &self,
        name: &str,
        kind: ValueKind,
        description: &str,
    ) -> Result<FieldId, RegistryError>;

    /// Like [`resolve_or_create`](Self::resolve_or_create), with a builder
    /// used by [`instance_of`](Self::instance_of). Used for complex fields.
    fn register_builder(
        &self,
        name: &str,
        builder: ElementBuilder,
        description: &str,
    ) -> Result<FieldId, RegistryError>;

    /// Id of an already registered name.
    fn id_of(&self, name: &str) -> Option<FieldId>;

    /// Name of a registered id.
    fn name_of(&self, id: FieldId) -> Option<String>;

    /// Description of a registered id.
    fn description_of(&self, id: FieldId) -> Option<String>;

    /// Kind of a registered id.
    fn kind_of(&self, id: FieldId) -> Option<ValueKind>;

    /// A fresh instance of a registered field, tagged with its id.
    fn instance_of(&self, id: FieldId) -> Result<SharedValue, RegistryError>;

    /// Id of `name`, or [`UNKNOWN_FIELD`] if it was never registered.
    /// Path resolution uses this so unknown names simply match nothing.
    fn id_or_unknown(&self, name: &str) -> FieldId {
        self.id_of(name).unwrap_or(UNKNOWN_FIELD)
    }
}

/// Shared handle to a registry, passed into every constructor that needs one.
pub type SharedRegistry = Arc<dyn FieldRegistry>;

/// One registered field, as listed by [`EntryTracker::fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Assigned id
    pub id: FieldId,
    /// Registered name
    pub name: String,
    /// Registered kind
    pub kind: ValueKind,
    /// Free-form description
    pub description: String,
}
