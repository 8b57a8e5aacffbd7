//! Logger builder implementation

#[macro_use]
mod format;

// External dependencies
use tracing::Dispatch;
use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt};

// Internal crates
use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};
use crate::writer;

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build a dispatcher without installing it.
    ///
    /// # Errors
    ///
    /// Returns error if the level filter cannot be parsed.
    pub fn build_dispatch(self) -> LogResult<Dispatch> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        let subscriber = Registry::default()
            .with(filter)
            .with(self.format_layer());

        Ok(Dispatch::new(subscriber))
    }

    /// Build and install as the global default.
    ///
    /// # Errors
    ///
    /// Returns error if the filter is invalid or a global subscriber is
    /// already set.
    pub fn init(self) -> LogResult<()> {
        let dispatch = self.build_dispatch()?;
        tracing::dispatcher::set_global_default(dispatch)
            .map_err(|e| LogError::AlreadySet(e.to_string()))
    }

    /// Build and install for the current thread until the guard drops.
    pub fn init_scoped(self) -> LogResult<DefaultGuard> {
        let dispatch = self.build_dispatch()?;
        Ok(tracing::dispatcher::set_default(&dispatch))
    }

    fn format_layer(&self) -> BoxedLayer {
        let display = &self.config.display;
        let writer = writer::make_writer(self.config.writer);

        match self.config.format {
            Format::Pretty => {
                boxed_fmt_layer!(
                    tracing_subscriber::fmt::layer().pretty().with_writer(writer),
                    display
                )
            }
            Format::Compact => {
                boxed_fmt_layer!(
                    tracing_subscriber::fmt::layer().compact().with_writer(writer),
                    display
                )
            }
            Format::Json => {
                boxed_fmt_layer!(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .flatten_event(display.flatten)
                        .with_current_span(true)
                        .with_writer(writer),
                    display
                )
            }
        }
    }
}
