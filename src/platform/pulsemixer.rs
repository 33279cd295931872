//! Volume via the pulsemixer CLI.

use std::time::Duration;

use super::command::run_stdout;
use crate::core::status_bar::{Mixer, VolumeStatus, UNAVAILABLE};
use crate::error::{Result, StatusError};

const PULSEMIXER: &str = "pulsemixer";

#[derive(Debug, Clone)]
pub struct PulseMixer {
    timeout: Duration,
}

impl PulseMixer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn level(&self) -> Result<i32> {
        let out = run_stdout(PULSEMIXER, &["--get-volume"], self.timeout).await?;
        parse_volume(&out)
    }

    async fn muted(&self) -> Result<bool> {
        let out = run_stdout(PULSEMIXER, &["--get-mute"], self.timeout).await?;
        parse_mute(&out)
    }
}

impl Mixer for PulseMixer {
    async fn volume(&self) -> VolumeStatus {
        let percent = match self.level().await {
            Ok(percent) => percent,
            Err(e) => {
                log::warn!("failed to read volume: {}", e);
                UNAVAILABLE
            }
        };
        // An unreadable mute switch counts as unmuted
        let muted = match self.muted().await {
            Ok(muted) => muted,
            Err(e) => {
                log::debug!("failed to read mute state: {}", e);
                false
            }
        };

        VolumeStatus { percent, muted }
    }
}

/// Average of the `left right` pair printed by `pulsemixer --get-volume`
pub fn parse_volume(out: &str) -> Result<i32> {
    let channels = out
        .split_whitespace()
        .map(|v| v.parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| StatusError::metric_collection(format!("bad volume {:?}: {}", out.trim(), e)))?;

    match channels.as_slice() {
        [left, right] => Ok(((i64::from(*left) + i64::from(*right)) / 2) as i32),
        _ => Err(StatusError::metric_collection(format!(
            "expected two volume channels, got {:?}",
            out.trim()
        ))),
    }
}

pub fn parse_mute(out: &str) -> Result<bool> {
    match out.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(StatusError::metric_collection(format!("bad mute state {:?}", other))),
    }
}
