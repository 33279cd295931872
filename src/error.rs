use std::io;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Custom error type for dwm-status
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to invoke {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed: {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        program: String,
        status: ExitStatus,
        /// Trimmed stderr of the child, empty when it printed nothing
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    CommandTimeout { program: String, timeout: Duration },

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("display update failed {count} times in a row")]
    TooManyFailures { count: u32 },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dwm-status
pub type Result<T> = std::result::Result<T, StatusError>;

impl StatusError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StatusError::Config(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        StatusError::MetricCollection(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        StatusError::GpuNotAvailable(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StatusError::Other(msg.into())
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
