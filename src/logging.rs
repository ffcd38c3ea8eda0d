//! Logging setup for the weerun harness
//!
//! Uses `tracing-subscriber` with a non-blocking `tracing-appender` writer.
//! Logs never go to stdout: stdout carries program output and the result
//! line only.

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{LogFormatSetting, LogSettings};

/// Environment variable holding filter directives (e.g. "weerun=debug,heap=trace")
pub const LOG_ENV: &str = "WEERUN_LOG";

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    /// File with daily rotation
    File { directory: PathBuf, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Extra filter directives, comma separated
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Build from the `[log]` section of the run configuration
    pub fn from_settings(settings: &LogSettings) -> Self {
        let format = match settings.format {
            LogFormatSetting::Pretty => LogFormat::Pretty,
            LogFormatSetting::Compact => LogFormat::Compact,
            LogFormatSetting::Json => LogFormat::Json,
        };
        let output = match &settings.file {
            Some(directory) => LogOutput::File {
                directory: directory.clone(),
                prefix: "weerun".to_string(),
            },
            None => LogOutput::Stderr,
        };

        Self {
            level: parse_level(&settings.level),
            format,
            output,
            filter: settings.filter.clone(),
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

}

/// Map a level name to a `Level` (unknown names fall back to WARN)
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Initialize the global logging system
///
/// Returns a `WorkerGuard` that must be kept alive for the duration of the
/// run so buffered log lines are flushed. Only the first call installs a
/// subscriber.
pub fn init_logging(config: LogConfig) -> Option<WorkerGuard> {
    if LOGGER_INITIALIZED.get().is_some() {
        return None;
    }

    let filter = build_filter(&config);
    let (layer, guard) = match &config.output {
        LogOutput::Stderr => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (build_layer(writer, config.format, filter), guard)
        }
        LogOutput::File { directory, prefix } => {
            let appender = rolling::daily(directory, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (build_layer(writer, config.format, filter), guard)
        }
    };

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        // Another subscriber is already installed
        return None;
    }
    let _ = LOGGER_INITIALIZED.set(());
    Some(guard)
}

fn build_layer<W>(writer: W, format: LogFormat, filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(true);
    match format {
        LogFormat::Pretty => layer.pretty().with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
    }
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }

    let base = EnvFilter::default().add_directive(LevelFilter::from_level(config.level).into());
    match &config.filter {
        Some(filter_str) => filter_str
            .split(',')
            .filter(|d| !d.trim().is_empty())
            .fold(base, |filter, directive| match directive.trim().parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => {
                    tracing::warn!("Invalid filter directive: {}", directive);
                    filter
                }
            }),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_flag_overrides_level() {
        let config = LogConfig::from_settings(&LogSettings::default()).with_level(Level::TRACE);

        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.filter, None);
    }

    #[test]
    fn test_filter_directives_from_settings() {
        let settings = LogSettings {
            filter: Some("heap=trace, ,bridge=debug".to_string()),
            ..LogSettings::default()
        };
        let config = LogConfig::from_settings(&settings);
        assert_eq!(config.filter.as_deref(), Some("heap=trace, ,bridge=debug"));

        if std::env::var_os(LOG_ENV).is_none() {
            let filter = build_filter(&config).to_string();
            assert!(filter.contains("heap=trace"), "{}", filter);
            assert!(filter.contains("bridge=debug"), "{}", filter);
        }
    }

    #[test]
    fn test_from_settings() {
        let settings = LogSettings {
            level: "trace".to_string(),
            format: LogFormatSetting::Pretty,
            file: Some(PathBuf::from("logs")),
            filter: None,
        };
        let config = LogConfig::from_settings(&settings);

        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(
            config.output,
            LogOutput::File {
                directory: PathBuf::from("logs"),
                prefix: "weerun".to_string()
            }
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("loud"), Level::WARN);
    }

    #[test]
    fn test_init_idempotent() {
        let _guard = init_logging(LogConfig::default());
        let second = init_logging(LogConfig::default());
        assert!(second.is_none());
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
