use primitives::{get_pretty_print_logs, Environment};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    filter::{EnvFilter, ParseError},
    fmt::MakeWriter,
    util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize: {0}")]
    Init(#[from] TryInitError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
}

type Result<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug)]
pub struct TelemetrySubscriber {}

impl TelemetrySubscriber {
    /// Installs the global subscriber at `INFO`.
    pub fn init<W>(out: W) -> Result<()>
    where
        W: for<'s> MakeWriter<'s> + 'static + Sync + Send,
    {
        Self::init_with_level(out, Level::INFO)
    }

    /// Installs the global subscriber. `RUST_LOG`, when set, takes precedence
    /// over `level`.
    pub fn init_with_level<W>(out: W, level: Level) -> Result<()>
    where
        W: for<'s> MakeWriter<'s> + 'static + Sync + Send,
    {
        let environ = primitives::get_ballotbox_environment();
        let is_local_env = matches!(environ, Environment::Local);

        let pretty_print_logs = get_pretty_print_logs();

        let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) => EnvFilter::try_new(directives)?,
            Err(_) => EnvFilter::default().add_directive(level.into()),
        };

        if pretty_print_logs {
            let sub = tracing_subscriber::fmt()
                .with_writer(out)
                .with_file(is_local_env)
                .with_line_number(is_local_env)
                .with_target(is_local_env)
                .with_env_filter(filter)
                .compact()
                .finish();

            sub.try_init()?;
        } else {
            let sub = tracing_subscriber::fmt()
                .with_writer(out)
                .with_file(is_local_env)
                .with_line_number(is_local_env)
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .flatten_event(true)
                .with_span_list(false)
                .finish();

            sub.try_init()?;
        }

        Ok(())
    }
}
