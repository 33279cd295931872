//! Orchestration of the refresh engine.
//!
//! Measures the startup values, spawns the background tasks and runs the
//! scheduler until it gives up.

use tokio::sync::{broadcast, mpsc};

use super::scheduler::RefreshScheduler;
use super::shared::refresh_state;
use super::sources::{DisplayPublisher, MetricSource, Mixer, NetworkProber};
use super::tasks::{network_task, volume_task, VolumeRefresh};
use crate::core::config::Config;
use crate::error::Result;

/// Build the Tokio runtime the status bar runs on
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("status-worker")
        .build()
}

/// All collaborators of one status bar instance
pub struct StatusBar<M, P, N, X> {
    config: Config,
    metrics: M,
    publisher: P,
    prober: N,
    mixer: X,
}

impl<M, P, N, X> StatusBar<M, P, N, X>
where
    M: MetricSource,
    P: DisplayPublisher,
    N: NetworkProber,
    X: Mixer,
{
    pub fn new(config: Config, metrics: M, publisher: P, prober: N, mixer: X) -> Self {
        Self {
            config,
            metrics,
            publisher,
            prober,
            mixer,
        }
    }

    /// Run until the display publisher fails too often.
    ///
    /// `requests` delivers out-of-band volume refresh requests, usually fed
    /// by the signal listener. `shutdown` is fired and the background tasks
    /// are aborted before this returns, so a pending external command does
    /// not delay exit.
    pub async fn run(
        self,
        requests: mpsc::Receiver<VolumeRefresh>,
        shutdown: broadcast::Sender<()>,
    ) -> Result<()> {
        let StatusBar {
            config,
            metrics,
            publisher,
            prober,
            mixer,
        } = self;

        // First tick must not start from empty values
        let network = prober.probe().await;
        let volume = mixer.volume().await;
        log::debug!("startup network {:?}, volume {:?}", network, volume);

        let (network_writer, volume_writer, reader) = refresh_state(network, volume);

        let network_handle = tokio::spawn(network_task(
            prober,
            network_writer,
            config.network_period(),
            shutdown.subscribe(),
        ));
        let volume_handle = tokio::spawn(volume_task(
            mixer,
            volume_writer,
            requests,
            shutdown.subscribe(),
        ));

        let result = RefreshScheduler::new(&config, metrics, publisher, reader)
            .run()
            .await;

        // A probe or mixer query may still be running; dropping it kills the child
        let _ = shutdown.send(());
        network_handle.abort();
        volume_handle.abort();
        let _ = network_handle.await;
        let _ = volume_handle.await;

        result
    }
}
