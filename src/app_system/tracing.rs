use crate::config::Config;

/// Installs the process-wide subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.log_filter` applies.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=cafe_orders::actors=debug,info cargo run
/// ```
pub fn setup_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
