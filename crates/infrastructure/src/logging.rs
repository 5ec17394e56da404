use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::{ConfigError, LogFormat, LogLevel};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Install the gateway's global subscriber, writing to stdout.
///
/// `RUST_LOG` wins over `level` when set. JSON lines are flattened so event
/// fields such as `alert_id` and `error` sit at the top level of each record;
/// text output is the multi-line pretty format for local runs. Calling this
/// twice returns an error.
pub fn init_logging(level: LogLevel, format: LogFormat) -> Result<(), ConfigError> {
    let subscriber = build_subscriber(env_filter(level), format, std::io::stdout);
    tracing::subscriber::set_global_default(subscriber).map_err(|e| ConfigError::Validation {
        field: "server.log_format".to_string(),
        message: format!("logging already initialized: {e}"),
    })
}

/// Root span for the process. Entered once in `main`, so every record
/// carries the service name and build version.
pub fn service_span(version: &str) -> tracing::Span {
    tracing::info_span!("alertgate", service = "alertgate", version = %version)
}

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn build_subscriber<W>(filter: EnvFilter, format: LogFormat, writer: W) -> BoxedSubscriber
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Text => Box::new(
            registry.with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
        ),
    }
}
