//! Instance builders for registered fields.

use std::fmt;
use std::sync::Arc;

use tracker_value::{FieldId, SharedValue, ValueKind};

type BuildFn = dyn Fn(FieldId) -> SharedValue + Send + Sync;

/// Manufactures fresh instances of a registered field.
///
/// Plain fields are built from their kind's default payload. Complex fields
/// (structured records) register a builder that produces a fully reserved
/// prototype, so generic code can make more instances of a field without
/// knowing its concrete record type.
#[derive(Clone)]
pub struct ElementBuilder {
    kind: ValueKind,
    build: Option<Arc<BuildFn>>,
}

impl ElementBuilder {
    /// Builder producing the default payload of `kind`.
    pub fn of_kind(kind: ValueKind) -> Self {
        ElementBuilder { kind, build: None }
    }

    /// Builder running `build` for every new instance. `kind` is the kind
    /// every built node must have.
    pub fn new(
        kind: ValueKind,
        build: impl Fn(FieldId) -> SharedValue + Send + Sync + 'static,
    ) -> Self {
        ElementBuilder {
            kind,
            build: Some(Arc::new(build)),
        }
    }

    /// Kind of the nodes this builder produces.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns `true` if this builder runs custom code.
    pub fn is_custom(&self) -> bool {
        self.build.is_some()
    }

    /// A fresh node tagged with `id`.
    pub fn build(&self, id: FieldId) -> SharedValue {
        match &self.build {
            Some(build) => {
                let node = build(id);
                node.set_id(id);
                node
            }
            None => SharedValue::with_id(self.kind, id),
        }
    }
}

impl fmt::Debug for ElementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBuilder")
            .field("kind", &self.kind)
            .field("custom", &self.is_custom())
            .finish()
    }
}
