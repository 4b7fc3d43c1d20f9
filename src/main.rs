use std::process;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hostel::config::Config;

fn main() {
    // Logs go to stderr; stdout is command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("HOSTEL_LOG").unwrap_or_else(|_| "hostel=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = hostel::cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
