//! The refresh loop.
//!
//! Every tick samples the synchronous metric readers, picks up the latest
//! network and volume values from the shared state, renders the line and
//! hands it to the display publisher. Consecutive publish failures are
//! counted; reaching the configured maximum ends the loop.

use chrono::Local;
use std::time::Duration;

use super::format::render_status_line;
use super::metrics::StatusSnapshot;
use super::shared::RefreshStateReader;
use super::sources::{DisplayPublisher, MetricSource};
use crate::core::config::Config;
use crate::error::{Result, StatusError};

/// Consecutive publish failures since the last success
#[derive(Debug, Clone)]
pub struct FailureCounter {
    count: u32,
    max: u32,
}

impl FailureCounter {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn record_success(&mut self) {
        self.count = 0;
    }

    /// Returns `true` once the maximum has been reached
    pub fn record_failure(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.count >= self.max
    }
}

/// What a single tick did with the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Published,
    Failed { consecutive: u32 },
}

pub struct RefreshScheduler<M, P> {
    metrics: M,
    publisher: P,
    shared: RefreshStateReader,
    failures: FailureCounter,
    period: Duration,
    date_format: String,
}

impl<M: MetricSource, P: DisplayPublisher> RefreshScheduler<M, P> {
    pub fn new(config: &Config, metrics: M, publisher: P, shared: RefreshStateReader) -> Self {
        Self {
            metrics,
            publisher,
            shared,
            failures: FailureCounter::new(config.max_fails),
            period: config.refresh_period(),
            date_format: config.date_format.clone(),
        }
    }

    pub fn failures(&self) -> &FailureCounter {
        &self.failures
    }

    /// Sample the readers and the shared state into one snapshot
    pub fn snapshot(&mut self) -> StatusSnapshot {
        let timestamp = Local::now();

        StatusSnapshot {
            timestamp,
            cpu_percent: self.metrics.cpu_percent(),
            gpu: self.metrics.gpu(),
            ram_percent: self.metrics.ram_percent(),
            battery: self.metrics.battery(),
            volume: self.shared.volume(),
            network: self.shared.network(),
        }
    }

    pub fn render(&mut self) -> String {
        let snapshot = self.snapshot();
        render_status_line(&snapshot, &self.date_format)
    }

    /// Run one refresh.
    ///
    /// Fails with [`StatusError::TooManyFailures`] when this publish failure
    /// was the last one allowed.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let line = self.render();

        match self.publisher.publish(&line).await {
            Ok(()) => {
                if self.failures.count() > 0 {
                    log::info!("display updated again after {} failures", self.failures.count());
                }
                self.failures.record_success();
                Ok(TickOutcome::Published)
            }
            Err(e) => {
                log::error!("{}", e);
                if self.failures.record_failure() {
                    return Err(StatusError::TooManyFailures {
                        count: self.failures.count(),
                    });
                }
                Ok(TickOutcome::Failed {
                    consecutive: self.failures.count(),
                })
            }
        }
    }

    /// Refresh forever.
    ///
    /// The sleep between ticks is fixed and does not account for the time
    /// the tick took. Only returns on too many consecutive failures.
    pub async fn run(mut self) -> Result<()> {
        loop {
            self.tick().await?;
            tokio::time::sleep(self.period).await;
        }
    }
}
