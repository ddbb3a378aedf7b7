//! Logger setup for the command-line front end.

use env_logger::Env;

/// Initializes the global logger using `env_logger`.
///
/// `RUST_LOG` takes precedence. Otherwise the filter is `warn`, raised to
/// `info`, `debug` or `trace` by `verbosity` 1, 2 or 3+.
pub fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(default_filter(verbosity));
    // Ignore errors if the logger was already initialized
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
}

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
