// src/logging.rs
// =============================================================================
// Sets up logging with `tracing`.
//
// Log lines go to stderr so stdout only ever holds the tree (or JSON),
// which keeps `repo-tree ... > TREE.md` and pipes clean.
//
// Filtering:
// - RUST_LOG wins when set (e.g. RUST_LOG=repo_tree=trace)
// - otherwise warnings only, or debug with --verbose
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn setup_logging(verbose: bool) {
    let default_directive = if verbose { "repo_tree=debug" } else { "repo_tree=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // try_init: a second call is a no-op instead of a panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
