use std::time::Duration;

use super::command::run;
use crate::core::status_bar::{NetworkProber, NetworkStatus};

/// Reachability through a single `ping` to a fixed host
#[derive(Debug, Clone)]
pub struct PingProber {
    host: String,
    timeout: Duration,
}

impl PingProber {
    pub fn new<S: Into<String>>(host: S, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }
}

impl NetworkProber for PingProber {
    async fn probe(&self) -> NetworkStatus {
        match run("ping", &["-c", "1", self.host.as_str()], self.timeout).await {
            Ok(_) => NetworkStatus::Reachable,
            Err(e) => {
                log::debug!("{} unreachable: {}", self.host, e);
                NetworkStatus::Unreachable
            }
        }
    }
}
