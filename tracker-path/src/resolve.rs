//! Walking a tree along a [`FieldPath`].
//!
//! A missing step is never an error: single-path resolution returns `None`
//! and multi-path resolution returns fewer (or no) nodes. Guards are released
//! before descending, so resolution never holds more than one node lock.

use tracker_registry::FieldRegistry;
use tracker_value::{FieldId, Payload, SharedValue};

use crate::FieldPath;
use crate::tracing_macros::trace;

/// Follow `path` from `start`, one field-map lookup per step (first entry
/// with the id). Any other node kind along the way ends resolution with
/// `None`. The empty path returns `start`.
pub fn get_path(start: &SharedValue, path: &FieldPath) -> Option<SharedValue> {
    let mut current = start.clone();
    for (step, &id) in path.ids().iter().enumerate() {
        let next = match current.read().payload() {
            Payload::Map(map) => map.find(id).cloned(),
            _ => None,
        };
        match next {
            Some(child) => current = child,
            None => {
                trace!(%path, step, id, "path not found");
                return None;
            }
        }
    }
    Some(current)
}

/// [`get_path`] for a textual path.
pub fn get_path_str(
    start: &SharedValue,
    path: &str,
    registry: &dyn FieldRegistry,
) -> Option<SharedValue> {
    get_path(start, &FieldPath::parse(path, registry))
}

/// Follow `path` from `start`, fanning out across collections.
///
/// Field maps are stepped into by id. Whenever the current node is a vector
/// or one of the keyed maps and path remains, resolution continues
/// independently from every entry, in the collection's iteration order, and
/// the results are concatenated. Entries that are themselves vectors or keyed
/// maps fan out again, so nested collections yield outer-then-inner order.
///
/// A path that lands on a vector or keyed map yields its entries, not the
/// collection node. Field maps are returned as they are.
pub fn get_multi_path(start: &SharedValue, path: &FieldPath) -> Vec<SharedValue> {
    let mut out = Vec::new();
    collect_multi(start, path.ids(), &mut out);
    out
}

/// [`get_multi_path`] for a textual path.
pub fn get_multi_path_str(
    start: &SharedValue,
    path: &str,
    registry: &dyn FieldRegistry,
) -> Vec<SharedValue> {
    get_multi_path(start, &FieldPath::parse(path, registry))
}

pub(crate) enum Step {
    Child(SharedValue),
    FanOut(Vec<SharedValue>),
    Dead,
}

/// What resolving `id` from `node` leads to.
pub(crate) fn step(node: &SharedValue, id: FieldId) -> Step {
    let guard = node.read();
    match guard.payload() {
        Payload::Map(map) => match map.find(id) {
            Some(child) => Step::Child(child.clone()),
            None => Step::Dead,
        },
        payload if payload.kind().fans_out() => match guard.children() {
            Ok(children) => Step::FanOut(children),
            Err(_) => Step::Dead,
        },
        _ => Step::Dead,
    }
}

fn collect_multi(node: &SharedValue, rest: &[FieldId], out: &mut Vec<SharedValue>) {
    let Some((&id, tail)) = rest.split_first() else {
        let guard = node.read();
        match guard.children() {
            Ok(children) if guard.kind().fans_out() => out.extend(children),
            _ => out.push(node.clone()),
        }
        return;
    };
    match step(node, id) {
        Step::Child(child) => collect_multi(&child, tail, out),
        Step::FanOut(children) => {
            for child in &children {
                collect_multi(child, rest, out);
            }
        }
        Step::Dead => {
            trace!(id, remaining = rest.len(), "multi-path branch ends");
        }
    }
}
