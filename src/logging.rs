// Tracing setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Filter variable, e.g. `EMPLOYEE_DESK_LOG=employee_desk=debug`
pub const LOG_ENV: &str = "EMPLOYEE_DESK_LOG";

fn default_filter(verbose: bool) -> String {
    if verbose {
        "employee_desk=debug".to_string()
    } else {
        "employee_desk=info".to_string()
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let env = std::env::var(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

/// Only install a subscriber when the filter variable is set explicitly.
///
/// The terminal UI owns stdout and stderr while it runs.
pub fn init_tracing_if_requested(verbose: bool) -> bool {
    if std::env::var_os(LOG_ENV).is_some() {
        init_tracing(verbose);
        true
    } else {
        false
    }
}
