//! # Cohort Telemetry
//!
//! Logging setup shared by the discovery binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cohort_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::for_service("cd-admin"))?;
//!     // Every `tracing` event is now filtered and formatted.
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `cohort-discovery` | Service name in logs |
//! | `CD_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `CD_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `CD_JSON_LOGS` | `false` (`true` in containers) | JSON lines instead of text |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging for the process.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs shutdown on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for creating a span with subsystem context.
///
/// ```rust,ignore
/// let result = request
///     .instrument(cohort_telemetry::subsystem_span!("discovery_request", subsystem = "cd-06-discovery"))
///     .await;
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
