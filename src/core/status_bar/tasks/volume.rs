//! Signal-triggered volume refresh.
//!
//! Signals only enqueue a request; the mixer is queried from a regular task,
//! never from signal context.

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{broadcast, mpsc};

use crate::core::status_bar::shared::VolumeWriter;
use crate::core::status_bar::sources::Mixer;
use crate::error::Result;

/// Request for an out-of-band volume refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRefresh;

/// Bounded to one pending request, so bursts of signals coalesce
pub fn volume_refresh_channel() -> (mpsc::Sender<VolumeRefresh>, mpsc::Receiver<VolumeRefresh>) {
    mpsc::channel(1)
}

/// Queue a refresh unless one is already pending
pub fn request_volume_refresh(tx: &mpsc::Sender<VolumeRefresh>) {
    if tx.try_send(VolumeRefresh).is_err() {
        log::debug!("volume refresh already pending");
    }
}

/// Install the SIGUSR1 and SIGHUP listeners.
///
/// Must be called from within the runtime. Registration errors surface here,
/// before the refresh loop starts.
pub fn spawn_signal_listener(
    tx: mpsc::Sender<VolumeRefresh>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<tokio::task::JoinHandle<()>> {
    let mut usr1 = signal(SignalKind::user_defined1())?;
    let mut hup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(()) = usr1.recv() => {
                    log::info!("SIGUSR1: volume refresh requested");
                    request_volume_refresh(&tx);
                }
                Some(()) = hup.recv() => {
                    log::info!("SIGHUP: volume refresh requested");
                    request_volume_refresh(&tx);
                }
                _ = shutdown.recv() => {
                    break;
                }
            }
        }
    }))
}

/// Task that queries the mixer whenever a refresh is requested
pub async fn volume_task<X: Mixer>(
    mixer: X,
    writer: VolumeWriter,
    mut requests: mpsc::Receiver<VolumeRefresh>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            request = requests.recv() => {
                if request.is_none() {
                    break;
                }
                let status = mixer.volume().await;
                log::debug!("volume refreshed: {:?}", status);
                writer.publish(status);
            }
            _ = shutdown.recv() => {
                break;
            }
        }
    }
}
