//! The serializer contract and the traversal every serializer shares.
//!
//! # Traversal order
//!
//! [`walk_for_serialize`] is depth-first. Each node's pre-serialize hook runs
//! before the node is reported, so the visitor always sees refreshed
//! payloads. A node bound in the [`RenameMap`] has every hook along its
//! summary path run instead, starting from the record it was taken from. Children follow their collection's iteration order: insertion
//! order for vectors, id order for field maps, key order for keyed maps.
//!
//! # Traversal control
//!
//! | Decision        | Effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | `Recurse`       | Visit children, then call `leave`.                      |
//! | `SkipChildren`  | Skip descendants of this node; `leave` is still called. |
//! | `Stop`          | Terminate the entire walk immediately.                  |
//!
//! # Cycles
//!
//! Trees are acyclic by construction, but a node shared into one of its own
//! descendants would make the walk endless. A node already on the current
//! path is not reported again.

use core::fmt;

use tracker_value::{FieldId, MacAddr, Payload, SharedValue, TrackedValue};

use crate::RenameMap;
use crate::summary::refresh_for_serialize;

/// Encodes a tracked value tree into some external representation.
///
/// Implementations must honor `renames` (emit the renamed key for a bound
/// node), run every node's pre-serialize hook before reading its payload,
/// and emit children in collection iteration order. [`walk_for_serialize`]
/// does the last two.
pub trait TrackerSerializer {
    /// Error produced when encoding fails.
    type Error;

    /// Encode `value`.
    fn serialize(
        &self,
        value: &SharedValue,
        renames: Option<&RenameMap>,
    ) -> Result<Vec<u8>, Self::Error>;
}

/// How a node was reached from its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKey {
    /// The node the walk started from.
    Root,
    /// Field-map entry with this id.
    Field(FieldId),
    /// Vector element at this position.
    Index(usize),
    /// Int-map entry.
    Int(i64),
    /// MAC-map entry.
    Mac(MacAddr),
    /// String-map entry.
    Str(String),
    /// Double-map entry.
    Double(f64),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Root => f.write_str("<root>"),
            NodeKey::Field(id) => write!(f, "#{id}"),
            NodeKey::Index(i) => write!(f, "[{i}]"),
            NodeKey::Int(k) => write!(f, "{k}"),
            NodeKey::Mac(k) => write!(f, "{k}"),
            NodeKey::Str(k) => write!(f, "{k:?}"),
            NodeKey::Double(k) => write!(f, "{k}"),
        }
    }
}

/// Decision returned by [`SerializeVisitor::enter`] to control traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitDecision {
    /// Descend into this node's children, then call [`SerializeVisitor::leave`].
    Recurse,
    /// Skip this node's descendants. [`SerializeVisitor::leave`] is still called.
    SkipChildren,
    /// Stop the entire walk immediately. No further callbacks are made.
    Stop,
}

/// Outcome of [`walk_for_serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// The walk visited every reachable node.
    Completed,
    /// The walk was terminated early by [`VisitDecision::Stop`].
    Stopped,
}

/// Receives nodes from [`walk_for_serialize`].
pub trait SerializeVisitor {
    /// Called when the walker enters a node, **before** its children. `handle`
    /// identifies the node (for [`RenameMap`] lookups); `value` is its
    /// locked contents.
    fn enter(&mut self, key: &NodeKey, handle: &SharedValue, value: &TrackedValue)
    -> VisitDecision;

    /// Called after the node's children (or after skipping them).
    fn leave(&mut self, key: &NodeKey, handle: &SharedValue, value: &TrackedValue) {
        let _ = (key, handle, value);
    }
}

/// Walk `root` depth-first, running pre-serialize hooks and reporting every
/// node to `visitor`. Pass the summary's `renames` when walking a summary
/// tree. See the [module docs](self).
pub fn walk_for_serialize(
    root: &SharedValue,
    renames: Option<&RenameMap>,
    visitor: &mut impl SerializeVisitor,
) -> WalkStatus {
    let mut ancestors = Vec::new();
    if walk_node(&NodeKey::Root, root, renames, visitor, &mut ancestors) {
        WalkStatus::Stopped
    } else {
        WalkStatus::Completed
    }
}

fn children_of(value: &TrackedValue) -> Vec<(NodeKey, SharedValue)> {
    match value.payload() {
        Payload::Vector(v) => v
            .iter()
            .enumerate()
            .map(|(i, c)| (NodeKey::Index(i), c.clone()))
            .collect(),
        Payload::Map(m) => m.iter().map(|(id, c)| (NodeKey::Field(id), c.clone())).collect(),
        Payload::IntMap(m) => m.iter().map(|(k, c)| (NodeKey::Int(*k), c.clone())).collect(),
        Payload::MacMap(m) => m.iter().map(|(k, c)| (NodeKey::Mac(*k), c.clone())).collect(),
        Payload::StringMap(m) => m
            .iter()
            .map(|(k, c)| (NodeKey::Str(k.clone()), c.clone()))
            .collect(),
        Payload::DoubleMap(m) => m
            .iter()
            .map(|(k, c)| (NodeKey::Double(k.0), c.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns `true` if the walk was stopped.
fn walk_node(
    key: &NodeKey,
    node: &SharedValue,
    renames: Option<&RenameMap>,
    visitor: &mut impl SerializeVisitor,
    ancestors: &mut Vec<SharedValue>,
) -> bool {
    if ancestors.iter().any(|a| a.ptr_eq(node)) {
        return false;
    }

    refresh_for_serialize(node, renames, &|n| ancestors.iter().any(|a| a.ptr_eq(n)));
    let value = node.read();

    match visitor.enter(key, node, &value) {
        VisitDecision::Stop => return true,
        VisitDecision::SkipChildren => {
            visitor.leave(key, node, &value);
            return false;
        }
        VisitDecision::Recurse => {}
    }

    ancestors.push(node.clone());
    let mut stopped = false;
    for (child_key, child) in children_of(&value) {
        if walk_node(&child_key, &child, renames, visitor, ancestors) {
            stopped = true;
            break;
        }
    }
    ancestors.pop();

    if !stopped {
        visitor.leave(key, node, &value);
    }
    stopped
}
