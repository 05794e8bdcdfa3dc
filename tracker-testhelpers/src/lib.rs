//! Shared test setup for the tracker crates: a process-wide tracing
//! subscriber filtered by `TRACKER_LOG`, and colored panic backtraces.
//!
//! ```no_run
//! tracker_testhelpers::setup();
//! tracing::debug!("visible with TRACKER_LOG=debug");
//! ```

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        let secs = elapsed.as_secs();
        let millis = elapsed.subsec_millis();
        write!(w, "{:4}.{:03}s", secs, millis)
    }
}

/// Frames from the test harness and panic machinery, hidden from backtraces.
const HARNESS_FRAMES: &[&str] = &[
    "test::run_test",
    "test::__rust_begin_short_backtrace",
    "std::panicking::",
    "std::panic::",
    "core::panicking::",
    "std::sys::",
    "core::ops::function::FnOnce::call_once",
    "__pthread",
];

/// Lazy initialization of the global tracing subscriber.
///
/// This ensures the subscriber is set up exactly once, regardless of how many
/// tests run in the same process.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    // Force start time initialization
    let _ = *START_TIME;

    #[cfg(miri)]
    let verbosity = color_backtrace::Verbosity::Medium;

    #[cfg(not(miri))]
    let verbosity = color_backtrace::Verbosity::Full;

    color_backtrace::BacktracePrinter::new()
        .verbosity(verbosity)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| {
                frame
                    .name
                    .as_deref()
                    .is_none_or(|name| !HARNESS_FRAMES.iter().any(|p| name.starts_with(p)))
            })
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::Auto,
        )));

    let filter = std::env::var("TRACKER_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Set up a tracing subscriber for tests.
///
/// Safe to call from every test: the subscriber and the panic printer are
/// installed once per process. Set `TRACKER_LOG` to a `tracing` targets
/// filter (e.g. `tracker_path=trace,warn`) to change verbosity.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// Error type for test functions that panics as soon as `?` converts an
/// error into it, reporting the caller's location.
#[derive(Debug)]
pub struct IPanic;

impl<E> From<E> for IPanic
where
    E: core::error::Error + Send + Sync,
{
    #[track_caller]
    fn from(value: E) -> Self {
        panic!("from: {}: {value}", core::panic::Location::caller())
    }
}
