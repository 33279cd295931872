#[cfg(feature = "nvml")]
use nvml_wrapper::{Device, Nvml};

use crate::core::status_bar::{GpuProvider, GpuUsage};
use crate::error::{Result, StatusError};

/// NVIDIA GPU provider using NVML
pub struct NvidiaGpuProvider {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
    #[cfg_attr(not(feature = "nvml"), allow(dead_code))]
    device_index: u32,
}

impl NvidiaGpuProvider {
    /// Create a new NVIDIA GPU provider
    ///
    /// Initializes NVML and selects the first GPU.
    pub fn new() -> Result<Self> {
        Self::with_device_index(0)
    }

    /// Create provider for a specific GPU index
    pub fn with_device_index(index: u32) -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                StatusError::gpu_not_available(format!("failed to initialize NVML: {}", e))
            })?;

            let count = nvml.device_count().map_err(|e| {
                StatusError::gpu_not_available(format!("failed to get device count: {}", e))
            })?;
            if index >= count {
                return Err(StatusError::gpu_not_available(format!(
                    "GPU {} not found ({} devices)",
                    index, count
                )));
            }

            // Verify device exists
            let _ = nvml.device_by_index(index).map_err(|e| {
                StatusError::gpu_not_available(format!("failed to get GPU {}: {}", index, e))
            })?;

            Ok(Self {
                nvml,
                device_index: index,
            })
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = index;
            Err(StatusError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }

    #[cfg(feature = "nvml")]
    fn get_device(&self) -> Result<Device<'_>> {
        self.nvml
            .device_by_index(self.device_index)
            .map_err(|e| StatusError::metric_collection(format!("failed to get GPU device: {}", e)))
    }
}

impl GpuProvider for NvidiaGpuProvider {
    fn name(&self) -> Option<String> {
        #[cfg(feature = "nvml")]
        {
            match self.get_device().and_then(|device| {
                device.name().map_err(|e| {
                    StatusError::metric_collection(format!("failed to get GPU name: {}", e))
                })
            }) {
                Ok(name) => Some(name),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            }
        }
        #[cfg(not(feature = "nvml"))]
        {
            None
        }
    }

    fn utilization(&mut self) -> Result<GpuUsage> {
        #[cfg(feature = "nvml")]
        {
            let rates = self.get_device()?.utilization_rates().map_err(|e| {
                StatusError::metric_collection(format!("failed to get GPU utilization: {}", e))
            })?;

            Ok(GpuUsage {
                gpu_percent: rates.gpu as i32,
                memory_percent: rates.memory as i32,
            })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(StatusError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }
}
