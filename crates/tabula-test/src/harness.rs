//! Test logging setup.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber with `filter`.
///
/// Safe to call from every test; only the first call installs anything.
///
/// ```rust,ignore
/// #[test]
/// fn test_logging_setup() {
///     tabula_test::setup_test_logging("tabula_runtime=debug");
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// [`setup_test_logging`] at `warn`.
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}
