use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let indicatif_layer = IndicatifLayer::new();

        // RUST_LOG wins; otherwise ugcpak at the configured level, everything else at warn
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)));

        let fmt_layer = match config.output {
            LogOutput::Stderr => {
                format_layer(indicatif_layer.get_stderr_writer(), config.format, config.ansi)
            }
            LogOutput::Stdout => {
                format_layer(indicatif_layer.get_stdout_writer(), config.format, config.ansi)
            }
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger {
                level: config.level,
            })
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::info!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            ansi = config.ansi,
            "Logger initialized successfully"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Configured verbosity of the global logger
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Formatting layer for one output stream. JSON never carries ANSI codes.
fn format_layer<S, W>(writer: W, format: LogFormat, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer);
    match format {
        LogFormat::Text => layer.with_ansi(ansi).compact().boxed(),
        LogFormat::Json => layer.with_ansi(false).json().boxed(),
        LogFormat::Yaml => layer.with_ansi(ansi).pretty().boxed(),
    }
}

/// Build the default EnvFilter directive for a verbosity level
pub fn filter_directive(level: LogLevel) -> String {
    format!("warn,ugcpak={0},ugcpak_lib={0}", level.as_filter())
}

/// Log a pipeline step with its progress context.
///
/// Works whether or not the global subscriber is installed; without one the
/// event is simply dropped by tracing.
pub fn step(message: &str, context: &LogContext) {
    tracing::info!(
        operation = %context.operation,
        current = context.current_item,
        total = context.total_items,
        "{}", message
    );
}

/// Create a span for operations that should show progress bars
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
