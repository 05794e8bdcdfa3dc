//! Projecting a subset of a tree into a new, minimal tree.

use std::collections::HashMap;
use std::collections::hash_map;
use std::sync::Arc;

use tracker_registry::FieldRegistry;
use tracker_value::{FieldId, SharedValue, TrackedValue, ValueKind};

use crate::resolve::{Step, get_path, step};
use crate::tracing_macros::trace;
use crate::FieldPath;

/// One field to extract during summarization: a path from the record root
/// and an optional name to emit it under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummarySpec {
    path: FieldPath,
    rename: Option<String>,
}

impl SummarySpec {
    /// Extract `path`, keeping the field's own name.
    pub fn new(path: FieldPath) -> Self {
        SummarySpec { path, rename: None }
    }

    /// Extract `path`, emitted as `rename`. An empty rename is the same as
    /// none.
    pub fn renamed(path: FieldPath, rename: impl Into<String>) -> Self {
        let rename = rename.into();
        SummarySpec {
            path,
            rename: (!rename.is_empty()).then_some(rename),
        }
    }

    /// Spec for a `/`-separated path of field names.
    pub fn parse(text: &str, rename: Option<&str>, registry: &dyn FieldRegistry) -> Self {
        let path = FieldPath::parse(text, registry);
        match rename {
            Some(r) => Self::renamed(path, r),
            None => Self::new(path),
        }
    }

    /// Spec for a list of field names.
    pub fn from_segments<S: AsRef<str>>(
        segments: impl IntoIterator<Item = S>,
        rename: Option<&str>,
        registry: &dyn FieldRegistry,
    ) -> Self {
        let path = FieldPath::from_segments(segments, registry);
        match rename {
            Some(r) => Self::renamed(path, r),
            None => Self::new(path),
        }
    }

    /// Spec for an already resolved id path.
    pub fn from_ids(ids: impl Into<Vec<FieldId>>, rename: Option<&str>) -> Self {
        let path = FieldPath::from_ids(ids);
        match rename {
            Some(r) => Self::renamed(path, r),
            None => Self::new(path),
        }
    }

    /// The resolved path.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Name to emit the field under, if renamed.
    pub fn rename(&self) -> Option<&str> {
        self.rename.as_deref()
    }
}

/// How a summarized node was reached: the spec that selected it and the
/// root the spec's path was resolved from.
#[derive(Debug, Clone)]
pub struct SummaryBinding {
    /// The spec that selected the node.
    pub spec: Arc<SummarySpec>,
    /// Root the spec's path starts from.
    pub parent: SharedValue,
}

/// Map from summarized node (by identity) to the spec that selected it.
/// Serializers consult it to emit renamed keys.
#[derive(Debug, Clone, Default)]
pub struct RenameMap {
    bindings: HashMap<SharedValue, SummaryBinding>,
}

impl RenameMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `node` was selected by `binding`, replacing any earlier
    /// binding of the same node.
    pub fn insert(&mut self, node: SharedValue, binding: SummaryBinding) {
        self.bindings.insert(node, binding);
    }

    /// Binding of `node`, if it was summarized.
    pub fn get(&self, node: &SharedValue) -> Option<&SummaryBinding> {
        self.bindings.get(node)
    }

    /// Name `node` should be emitted under, if renamed.
    pub fn rename_of(&self, node: &SharedValue) -> Option<&str> {
        self.get(node).and_then(|b| b.spec.rename())
    }

    /// Number of bound nodes.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Every `(node, binding)` pair, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, SharedValue, SummaryBinding> {
        self.bindings.iter()
    }

    /// Move every binding of `other` into this map.
    pub fn merge(&mut self, other: RenameMap) {
        self.bindings.extend(other.bindings);
    }
}

/// Output of [`summarize`]: the reduced tree and its rename map.
#[derive(Debug, Clone)]
pub struct Summary {
    /// The reduced tree.
    pub root: SharedValue,
    /// Renames to apply when serializing `root`.
    pub renames: RenameMap,
}

impl Summary {
    /// Run pre-serialize hooks along every summarized path, so derived
    /// fields are fresh. Serializers given the rename map do this
    /// themselves; call it when reading the summary tree directly.
    pub fn prepare(&self) {
        for binding in self.renames.bindings.values() {
            pre_serialize_path(&binding.parent, binding.spec.path());
        }
    }
}

/// Build a new field map holding the nodes `specs` select from `source`.
///
/// Selected nodes are shared with `source`, not copied, and are inserted
/// under their own field ids in spec order. Specs whose path does not
/// resolve are skipped. With no specs at all the whole source is returned
/// unreduced.
pub fn summarize(source: &SharedValue, specs: &[SummarySpec]) -> Summary {
    if specs.is_empty() {
        return Summary {
            root: source.clone(),
            renames: RenameMap::new(),
        };
    }

    let mut out = TrackedValue::with_id(ValueKind::Map, source.id());
    let mut renames = RenameMap::new();
    if let Ok(fields) = out.as_field_map_mut() {
        for spec in specs {
            let Some(node) = get_path(source, spec.path()) else {
                trace!(path = %spec.path(), "summary field absent, skipped");
                continue;
            };
            fields.insert_node(node.clone());
            renames.insert(
                node,
                SummaryBinding {
                    spec: Arc::new(spec.clone()),
                    parent: source.clone(),
                },
            );
        }
    }

    Summary {
        root: SharedValue::new(out),
        renames,
    }
}

/// Summarize each of `sources` with the same specs. The result is a vector
/// of the per-source summaries with one merged rename map.
pub fn summarize_all(sources: &[SharedValue], specs: &[SummarySpec]) -> Summary {
    let mut items = TrackedValue::new(ValueKind::Vector);
    let mut renames = RenameMap::new();
    if let Ok(vector) = items.as_vector_mut() {
        for source in sources {
            let summary = summarize(source, specs);
            vector.push(summary.root);
            renames.merge(summary.renames);
        }
    }
    Summary {
        root: SharedValue::new(items),
        renames,
    }
}

/// Run the pre-serialize hook of `parent` and of every node along `path`.
///
/// Collections met along the way are fanned out, as in
/// [`get_multi_path`](crate::get_multi_path), so every node the path can
/// reach is refreshed even when the path is only partially consumed.
pub fn pre_serialize_path(parent: &SharedValue, path: &FieldPath) {
    trace!(%path, "pre-serialize path");
    refresh(parent, path.ids(), &|_| false);
}

/// Run the hooks `node` needs before a serializer reads it. A node bound in
/// `renames` gets its whole summary path refreshed from the binding's
/// parent; any other node runs only its own hook.
///
/// Nodes for which `held` returns `true` are locked by the caller and their
/// hooks are skipped.
pub(crate) fn refresh_for_serialize(
    node: &SharedValue,
    renames: Option<&RenameMap>,
    held: &dyn Fn(&SharedValue) -> bool,
) {
    match renames.and_then(|r| r.get(node)) {
        Some(binding) => {
            trace!(path = %binding.spec.path(), "pre-serialize summary path");
            refresh(&binding.parent, binding.spec.path().ids(), held);
        }
        None => {
            if !held(node) {
                node.pre_serialize();
            }
        }
    }
}

fn refresh(node: &SharedValue, rest: &[FieldId], held: &dyn Fn(&SharedValue) -> bool) {
    if !held(node) {
        node.pre_serialize();
    }
    let Some((&id, tail)) = rest.split_first() else {
        return;
    };
    match step(node, id) {
        Step::Child(child) => refresh(&child, tail, held),
        Step::FanOut(children) => {
            for child in &children {
                refresh(child, rest, held);
            }
        }
        Step::Dead => {}
    }
}
