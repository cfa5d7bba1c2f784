/// Centralized tracing configuration.
///
/// Logs go to stderr so they never interleave with the shell's screen on
/// stdout. Verbosity comes from `RUST_LOG` and defaults to `warn`:
///
/// ```bash
/// RUST_LOG=debug phonebook                      # everything
/// RUST_LOG=phonebook::storage=debug phonebook   # storage writes only
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
