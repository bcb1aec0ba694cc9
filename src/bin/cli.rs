//! otacheck CLI - Main entry point
//!
//! Runs one firmware check for the built-in device and prints the report.
//! Takes no arguments and always exits successfully; failure detail goes to
//! the log on stderr.

use otacheck_lib::engine::{
    check_for_update,
    cli::{print_banner, print_report},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::default();
    print_banner(&config.device);

    let outcome = check_for_update(&config);
    print_report(&outcome);
}
