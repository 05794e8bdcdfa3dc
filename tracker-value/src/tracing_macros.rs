//! Logging macros that compile to nothing when tracing is disabled.
//!
//! They forward to `tracing` when the `tracing` feature is enabled, and
//! always while running this crate's own unit tests. Each expands to a
//! statement, so they also work in match arms.

#[cfg(any(test, feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*);
    };
}

#[cfg(not(any(test, feature = "tracing")))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

pub(crate) use trace;
