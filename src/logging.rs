//! Logging setup and timing helpers

use std::time::Instant;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `debug`
/// when `verbose` is true.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "mattermost_dl=debug"
    } else {
        "mattermost_dl=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Create a new timer for an operation
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}
