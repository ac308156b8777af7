/*
System Log Adapter

Installs the global tracing subscriber for the service. Console output is always on, in text,
compact or JSON form; a daily-rolling log file is added when a file path is configured.

Records emitted through the `log` facade (actix-web's access logger among them) are bridged
into tracing by the subscriber, so everything ends up in the same sinks.
*/
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{ConsoleTarget, LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    #[error("Log file error: {0}")]
    Io(String),
    #[error("Failed to initialize logging: {0}")]
    InitFailed(String),
}

pub type LogResult<T> = Result<T, LogError>;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Handle on the installed subscriber. Dropping it stops the file writer thread.
pub struct SystemLogAdapter {
    _file_guard: Option<WorkerGuard>,
}

impl SystemLogAdapter {
    /// Installs the global subscriber. Fails if one is already installed.
    pub fn init(config: &LoggingConfig) -> LogResult<Self> {
        let (layers, file_guard) = Self::build_layers(config)?;

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|e| LogError::InitFailed(e.to_string()))?;

        Ok(Self {
            _file_guard: file_guard,
        })
    }

    fn build_layers(config: &LoggingConfig) -> LogResult<(Vec<BoxedLayer>, Option<WorkerGuard>)> {
        let filter = EnvFilter::try_new(&config.level)
            .map_err(|e| LogError::InvalidLevel(format!("{}: {}", config.level, e)))?;

        let mut layers: Vec<BoxedLayer> = vec![filter.boxed()];

        let console = match config.console {
            ConsoleTarget::Stdout => Self::console_layer(config.format, io::stdout),
            ConsoleTarget::Stderr => Self::console_layer(config.format, io::stderr),
        };
        layers.push(console);

        let file_guard = match config.file_path.as_deref() {
            Some(file_path) => {
                let (writer, guard) = non_blocking(Self::file_appender(Path::new(file_path))?);
                let file_layer = match config.format {
                    LogFormat::Json => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
                    _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
                };
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        Ok((layers, file_guard))
    }

    fn console_layer<W>(format: LogFormat, writer: W) -> BoxedLayer
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        match format {
            LogFormat::Json => fmt::layer().json().with_current_span(true).with_writer(writer).boxed(),
            LogFormat::Text => fmt::layer().with_target(true).with_writer(writer).boxed(),
            LogFormat::Compact => fmt::layer().compact().with_writer(writer).boxed(),
        }
    }

    fn file_appender(path: &Path) -> LogResult<rolling::RollingFileAppender> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(directory)
            .map_err(|e| LogError::Io(format!("{}: {}", directory.display(), e)))?;

        let file_name = path
            .file_name()
            .ok_or_else(|| LogError::Io(format!("{} has no file name", path.display())))?;

        Ok(rolling::daily(directory, file_name))
    }
}
