//! State refreshed outside the scheduler tick.
//!
//! Network status and volume are written by their own background tasks and
//! only read by the scheduler. Each field sits behind a `watch` channel so a
//! reader always sees a complete value, and each writer handle is unique,
//! which keeps every field single-writer.

use tokio::sync::watch;

use super::metrics::{NetworkStatus, VolumeStatus};

/// Create the shared state with the values measured at startup
pub fn refresh_state(
    network: NetworkStatus,
    volume: VolumeStatus,
) -> (NetworkWriter, VolumeWriter, RefreshStateReader) {
    let (network_tx, network_rx) = watch::channel(network);
    let (volume_tx, volume_rx) = watch::channel(volume);

    (
        NetworkWriter { tx: network_tx },
        VolumeWriter { tx: volume_tx },
        RefreshStateReader {
            network: network_rx,
            volume: volume_rx,
        },
    )
}

#[derive(Debug)]
pub struct NetworkWriter {
    tx: watch::Sender<NetworkStatus>,
}

impl NetworkWriter {
    pub fn publish(&self, status: NetworkStatus) {
        // send_replace keeps working once every reader is gone
        self.tx.send_replace(status);
    }
}

#[derive(Debug)]
pub struct VolumeWriter {
    tx: watch::Sender<VolumeStatus>,
}

impl VolumeWriter {
    pub fn publish(&self, status: VolumeStatus) {
        self.tx.send_replace(status);
    }
}

/// Read side handed to the scheduler
#[derive(Debug, Clone)]
pub struct RefreshStateReader {
    network: watch::Receiver<NetworkStatus>,
    volume: watch::Receiver<VolumeStatus>,
}

impl RefreshStateReader {
    /// Latest network status written by the network task
    pub fn network(&self) -> NetworkStatus {
        *self.network.borrow()
    }

    /// Latest volume written by the volume task
    pub fn volume(&self) -> VolumeStatus {
        *self.volume.borrow()
    }

    /// Wait until the volume task publishes a new value
    pub async fn volume_changed(&mut self) -> bool {
        self.volume.changed().await.is_ok()
    }

    /// Wait until the network task publishes a new value
    pub async fn network_changed(&mut self) -> bool {
        self.network.changed().await.is_ok()
    }
}
