#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub use tracker_path::*;
pub use tracker_record::*;
pub use tracker_registry::*;
pub use tracker_value::*;
