use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

// Default keeps our own spans verbose while muting reqwest's connection
// chatter; RUST_LOG overrides the whole filter.
const DEFAULT_FILTER: &str = "info,wayfarer=debug,hyper_util=warn,reqwest=warn";

/// Human-readable lines on a terminal, JSON lines everywhere else.
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if std::io::stdout().is_terminal() {
        builder.with_ansi(true).init();
    } else {
        builder.json().with_ansi(false).init();
    }
}
