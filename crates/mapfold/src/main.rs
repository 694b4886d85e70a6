//! mapfold: fan-out/fan-in map-reduce over files.

use mapfold_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Err(err) = app::run(&config) {
        std::process::exit(errors::exit_code(&err));
    }
}
