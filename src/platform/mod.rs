// Platform-specific code module

pub mod command;
pub mod display;
pub mod gpu;
pub mod ping;
pub mod procfs;
pub mod pulsemixer;

// Re-exports for clean imports
pub use display::{StdoutPublisher, XsetrootPublisher};
pub use gpu::get_gpu_provider;
pub use ping::PingProber;
pub use procfs::{BatteryReader, CpuReader, RamReader, SystemReaders};
pub use pulsemixer::PulseMixer;
