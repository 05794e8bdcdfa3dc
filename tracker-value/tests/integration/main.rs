//! Integration tests for `tracker-value`.

mod containers;
mod kinds;
