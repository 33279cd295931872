//! Background tasks that keep the shared refresh state current.
//!
//! The network task runs on a fixed delay of its own; the volume task only
//! wakes up when a refresh is requested.

mod network;
mod volume;

pub use network::network_task;
pub use volume::{
    request_volume_refresh, spawn_signal_listener, volume_refresh_channel, volume_task,
    VolumeRefresh,
};
