//! GPU-specific platform code.
//!
//! Provides GPU utilization for the optional GPU segment. Only NVIDIA (via
//! NVML) is supported.

mod nvidia;

pub use nvidia::NvidiaGpuProvider;

use crate::core::status_bar::GpuProvider;
use crate::error::Result;

/// Attempt to get an available GPU provider.
///
/// Called once at startup; on failure the GPU segment stays disabled for the
/// lifetime of the process.
pub fn get_gpu_provider() -> Result<Box<dyn GpuProvider>> {
    let provider = NvidiaGpuProvider::new()?;
    if let Some(name) = provider.name() {
        log::info!("GPU 0: {}", name);
    }
    Ok(Box::new(provider))
}
