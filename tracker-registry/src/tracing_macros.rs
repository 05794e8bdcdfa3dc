//! Logging macros that compile to nothing when tracing is disabled.

#[cfg(any(test, feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*);
    };
}

#[cfg(not(any(test, feature = "tracing")))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(any(test, feature = "tracing"))]
macro_rules! warning {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*);
    };
}

#[cfg(not(any(test, feature = "tracing")))]
macro_rules! warning {
    ($($arg:tt)*) => {};
}

pub(crate) use {debug, warning};
