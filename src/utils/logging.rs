use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "aicost=warn";
const DEBUG_FILTER: &str = "aicost=debug";

/// Filter directive: `--debug` wins, then `RUST_LOG`, then warnings only
fn build_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber; stdout is reserved for command output
pub(crate) fn init_logging(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(debug))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
