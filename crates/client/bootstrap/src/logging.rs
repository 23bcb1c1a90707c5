//! Tracing subscriber setup shared by front-ends.
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, with `level` as
/// the fallback directive.
///
/// Returns false when a global subscriber was already installed, so calling it
/// more than once is harmless.
pub fn setup_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
