//! Defines helpers for logging

pub use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// A builder for configuring the logging stack of the pool client
pub struct TelemetryBuilder {
    /// The subscriber layers to add to the telemetry stack
    layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>>,
    /// The level applied when `RUST_LOG` does not specify one
    default_level: LevelFilter,
}

impl Default for TelemetryBuilder {
    fn default() -> Self {
        Self { layers: Vec::new(), default_level: LevelFilter::INFO }
    }
}

impl TelemetryBuilder {
    /// Add a subscriber layer to the telemetry builder
    fn with_layer<L: Layer<Registry> + Send + Sync>(mut self, layer: L) -> Self {
        self.layers.push(layer.boxed());
        self
    }

    /// Set the default log level
    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    /// Configure logging, either as structured json lines or human readable
    /// output
    ///
    /// Logs go to stderr so that command output on stdout stays clean
    pub fn with_logging(self, json: bool) -> Self {
        if json {
            self.with_layer(fmt::layer().json().with_writer(std::io::stderr))
        } else {
            self.with_layer(fmt::layer().compact().with_writer(std::io::stderr))
        }
    }

    /// Initialize the global subscriber with the configured layers
    pub fn build(self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.default_level.into())
            .from_env_lossy();
        let layers = self.layers.with_filter(filter);
        tracing_subscriber::registry().with(layers).init()
    }
}

/// Configures logging for the pool client
pub fn configure_telemetry(json_logs: bool, level: LevelFilter) {
    TelemetryBuilder::default().with_default_level(level).with_logging(json_logs).build();
}
