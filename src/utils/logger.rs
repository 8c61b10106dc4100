use crate::constants::LOG_LEVEL_ENV;
use crate::utils::config::get_env_or_default;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Installs the global tracing subscriber, once per process
///
/// The level comes from the `LOGLEVEL` environment variable (default `INFO`);
/// `verbose` forces `DEBUG`. Output goes to standard error so that standard
/// output only carries gateway responses.
pub fn setup_logger(verbose: bool) {
    INIT.call_once(|| {
        let level = if verbose {
            Level::DEBUG
        } else {
            parse_level(&get_env_or_default(LOG_LEVEL_ENV, String::from("INFO")))
        };

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();

        // A subscriber installed by the embedding program wins.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn parse_level(name: &str) -> Level {
    match name.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
