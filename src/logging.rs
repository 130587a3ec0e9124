//! Console logging through `tracing-subscriber`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Human-readable output on stderr, filtered by `RUST_LOG`.
///
/// `verbose` raises the default level from `info` to `debug`; an explicit
/// `RUST_LOG` always wins. Stdout stays free for the JSON report.
pub fn init_cli(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
