//! Diagnostic logging on stderr.
//!
//! Standard output carries only the result line, so every log event goes to
//! stderr. The level comes from the command line; `RUST_LOG` is not read.
//!
//! ```text
//! pact-calc            # warnings and errors
//! pact-calc -v         # + info
//! pact-calc -vv        # + debug (one event per pipeline step)
//! pact-calc -q         # errors only
//! ```

use std::sync::Once;

use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static INIT: Once = Once::new();

/// Map `-q` and the number of `-v` flags to a level filter.
pub fn level_from_flags(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber.
///
/// Call once at startup. Later calls are ignored.
pub fn init(level: LevelFilter) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .without_time()
            .with_filter(level);

        // Fails only if another subscriber is already installed, e.g. by a test harness.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
