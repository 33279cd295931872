//! Status line refresh engine.
//!
//! This module provides the business logic for sampling system metrics,
//! keeping the background-refreshed fields current and publishing the
//! rendered line on a fixed period.

pub mod format;
mod gpu;
mod metrics;
mod runtime;
mod scheduler;
mod shared;
mod sources;
pub mod tasks;

pub use format::{render_status_line, MAX_STATUS_LEN, STATUS_BUFFER_SIZE};
pub use gpu::GpuProvider;
pub use metrics::{
    BatteryReading, BatteryState, GpuUsage, NetworkStatus, StatusSnapshot, VolumeStatus,
    UNAVAILABLE,
};
pub use runtime::{build_runtime, StatusBar};
pub use scheduler::{FailureCounter, RefreshScheduler, TickOutcome};
pub use shared::{refresh_state, NetworkWriter, RefreshStateReader, VolumeWriter};
pub use sources::{DisplayPublisher, MetricSource, Mixer, NetworkProber};
