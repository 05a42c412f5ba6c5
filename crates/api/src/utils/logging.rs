use std::time::Duration;

use daybook_domain::{DaybookError, LoggingConfig, ProvisionError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns `false` when a
/// subscriber was already installed (tests, embedding frontends).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = if config.json { builder.json().try_init().is_ok() } else { builder.try_init().is_ok() };

    if installed {
        info!(filter = %config.filter, json = config.json, "tracing initialised");
    }
    installed
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"calendar::get_calendar_view"`).
/// * `elapsed` - Duration the command execution took.
/// * `error_type` - Stable label of the failure, `None` on success.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

/// Convert a `DaybookError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &DaybookError) -> &'static str {
    match error {
        DaybookError::Validation(_) => "validation",
        DaybookError::NotFound(_) => "not_found",
        DaybookError::Transport(_) => "transport",
        DaybookError::Auth(_) => "auth",
        DaybookError::Config(_) => "config",
        DaybookError::Storage(_) => "storage",
        DaybookError::Internal(_) => "internal",
    }
}

/// Stable label for a provisioning failure.
#[inline]
pub fn provision_error_label(error: &ProvisionError) -> &'static str {
    match error {
        ProvisionError::NoCredential => "no_credential",
        ProvisionError::Unauthorized => "unauthorized",
        ProvisionError::ApiNotEnabled => "api_not_enabled",
        ProvisionError::Provision { .. } => "provision",
        ProvisionError::LinkNotFound => "link_not_found",
        ProvisionError::Transport(_) => "transport",
    }
}
