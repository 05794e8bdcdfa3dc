//! Navigation, summarization and serialization walks over tracked value trees.
//!
//! - [`FieldPath`]: a `/`-separated path of field names, resolved once
//!   through a [`FieldRegistry`](tracker_registry::FieldRegistry) into ids.
//! - [`get_path`] follows exactly one child per step; [`get_multi_path`] fans
//!   out across vectors and keyed maps, so one path can select a field from
//!   every entry of a collection.
//! - [`summarize`] builds a reduced tree from a list of [`SummarySpec`]s and
//!   returns the [`RenameMap`] a serializer needs to emit renamed keys.
//! - [`TrackerSerializer`] is the contract every output format implements;
//!   [`walk_for_serialize`] is the traversal they share. With the `serde`
//!   feature, `SerializeTree` hands a tree to any serde serializer.
//!
//! A path that does not resolve is not an error. It yields `None`, an empty
//! result, or a summary without that field.

#![warn(missing_docs)]

mod tracing_macros;

mod path;
pub use path::{FieldPath, SEPARATOR};

mod resolve;
pub use resolve::{get_multi_path, get_multi_path_str, get_path, get_path_str};

mod summary;
pub use summary::{
    RenameMap, Summary, SummaryBinding, SummarySpec, pre_serialize_path, summarize, summarize_all,
};

pub mod serialize;
pub use serialize::{
    NodeKey, SerializeVisitor, TrackerSerializer, VisitDecision, WalkStatus, walk_for_serialize,
};

#[cfg(feature = "serde")]
mod serde_impl;
#[cfg(feature = "serde")]
pub use serde_impl::SerializeTree;
