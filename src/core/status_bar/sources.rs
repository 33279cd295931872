//! Contracts of the collaborators the refresh engine talks to.
//!
//! None of these report failure through a fatal path except the display
//! publisher: readers fall back to [`UNAVAILABLE`](super::metrics::UNAVAILABLE),
//! the prober to [`NetworkStatus::Unreachable`] and the mixer to
//! [`VolumeStatus::UNAVAILABLE`].

use std::future::Future;

use super::metrics::{BatteryReading, GpuUsage, NetworkStatus, VolumeStatus};
use crate::error::Result;

/// Metrics sampled synchronously on every scheduler tick
pub trait MetricSource: Send {
    fn cpu_percent(&mut self) -> i32;

    fn ram_percent(&mut self) -> i32;

    fn battery(&mut self) -> BatteryReading;

    /// `None` when no GPU source was initialized; the GPU segment is then
    /// left out of the line.
    fn gpu(&mut self) -> Option<GpuUsage>;
}

/// Audio mixer queried on startup and on every volume refresh request
pub trait Mixer: Send + Sync + 'static {
    fn volume(&self) -> impl Future<Output = VolumeStatus> + Send;
}

/// Reachability check run by the network task
pub trait NetworkProber: Send + Sync + 'static {
    fn probe(&self) -> impl Future<Output = NetworkStatus> + Send;
}

/// Sink for the rendered status line
pub trait DisplayPublisher: Send + Sync {
    fn publish(&self, line: &str) -> impl Future<Output = Result<()>> + Send;
}
