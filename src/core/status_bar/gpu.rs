use super::metrics::GpuUsage;
use crate::error::Result;

/// Trait for GPU utilization providers
///
/// Implementations are provided in the platform layer. A provider only
/// exists when its initialization succeeded at startup.
pub trait GpuProvider: Send {
    /// Human readable device name, for the startup log
    fn name(&self) -> Option<String>;

    /// Current core and memory-controller utilization
    fn utilization(&mut self) -> Result<GpuUsage>;
}
