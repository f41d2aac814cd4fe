//! Tracing subscriber for the converter
//!
//! Events always go to the console. With `logging.local_enabled` they are
//! also written as JSON lines to a rolling file under `logging.local_path`.
//!
//! ```no_run
//! use wfdb_json::config::LoggingConfig;
//! use wfdb_json::logging::init_logging;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, WfdbJsonError};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "wfdb-json.log";

const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Flushes the file writer when dropped; hold it until exit
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG`, when set, replaces the `wfdb_json=<level>` filter. Fails if
/// the level or rotation is unknown, the log directory cannot be created, or
/// a subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wfdb_json={level}")));

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(filter.clone())
        .boxed();

    let (file, file_guard) = match config.local_enabled {
        true => {
            let (layer, guard) = json_file_layer(config, filter)?;
            (Some(layer), Some(guard))
        }
        false => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| WfdbJsonError::Other(format!("Failed to install log subscriber: {e}")))?;

    tracing::debug!(
        %level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );
    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn json_file_layer<S>(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let rotation = parse_rotation(&config.local_rotation)?;
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        WfdbJsonError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, &config.local_path, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_names(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok((layer, guard))
}

fn parse_log_level(name: &str) -> Result<Level> {
    LEVELS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            WfdbJsonError::Configuration(format!(
                "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
            ))
        })
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(WfdbJsonError::Configuration(format!(
            "Invalid log rotation: {other}. Must be one of: daily, hourly, never"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("Debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO)]
    #[test_case("warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level(name: &str, expected: Level) {
        assert_eq!(parse_log_level(name).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("3" ; "numeric")]
    #[test_case("verbose" ; "unknown name")]
    fn test_parse_log_level_rejects(name: &str) {
        assert!(parse_log_level(name).is_err());
    }

    #[test]
    fn test_parse_rotation() {
        assert_eq!(parse_rotation("daily").unwrap(), Rotation::DAILY);
        assert_eq!(parse_rotation("hourly").unwrap(), Rotation::HOURLY);
        assert_eq!(parse_rotation("never").unwrap(), Rotation::NEVER);
        assert!(parse_rotation("size").is_err());
    }
}
