//! Network reachability task.

use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::status_bar::shared::NetworkWriter;
use crate::core::status_bar::sources::NetworkProber;

/// Task that re-checks reachability in the background.
///
/// Sleeps `delay`, probes, publishes, and starts over. The startup value is
/// measured by the caller before this task is spawned.
pub async fn network_task<N: NetworkProber>(
    prober: N,
    writer: NetworkWriter,
    delay: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                let status = prober.probe().await;
                log::debug!("network probe: {:?}", status);
                writer.publish(status);
            }
            _ = shutdown.recv() => {
                break;
            }
        }
    }
}
