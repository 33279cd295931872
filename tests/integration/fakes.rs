use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dwm_status::core::status_bar::{
    BatteryReading, DisplayPublisher, GpuUsage, MetricSource, Mixer, NetworkProber,
    NetworkStatus, VolumeStatus,
};
use dwm_status::{Result, StatusError};

/// Readers returning fixed values
#[derive(Debug, Clone)]
pub struct FakeMetrics {
    pub cpu: i32,
    pub ram: i32,
    pub battery: BatteryReading,
    pub gpu: Option<GpuUsage>,
}

impl MetricSource for FakeMetrics {
    fn cpu_percent(&mut self) -> i32 {
        self.cpu
    }

    fn ram_percent(&mut self) -> i32 {
        self.ram
    }

    fn battery(&mut self) -> BatteryReading {
        self.battery
    }

    fn gpu(&mut self) -> Option<GpuUsage> {
        self.gpu
    }
}

/// Publisher that follows a script of outcomes, then keeps returning
/// `fallback`. Every line it was handed is recorded.
#[derive(Debug, Clone)]
pub struct FakePublisher {
    script: Arc<Mutex<VecDeque<bool>>>,
    fallback: bool,
    lines: Arc<Mutex<Vec<String>>>,
}

impl FakePublisher {
    pub fn scripted(script: &[bool], fallback: bool) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.iter().copied().collect())),
            fallback,
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always_failing() -> Self {
        Self::scripted(&[], false)
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

impl DisplayPublisher for FakePublisher {
    async fn publish(&self, line: &str) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        let ok = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);

        if ok {
            Ok(())
        } else {
            Err(StatusError::other("xsetroot failed"))
        }
    }
}

/// Mixer returning queued values, repeating the last one
#[derive(Debug, Clone)]
pub struct FakeMixer {
    values: Arc<Mutex<VecDeque<VolumeStatus>>>,
    calls: Arc<AtomicU32>,
}

impl FakeMixer {
    pub fn new(values: &[VolumeStatus]) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.iter().copied().collect())),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Mixer for FakeMixer {
    async fn volume(&self) -> VolumeStatus {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut values = self.values.lock().unwrap();
        if values.len() > 1 {
            values.pop_front().unwrap()
        } else {
            values.front().copied().unwrap_or(VolumeStatus::UNAVAILABLE)
        }
    }
}

/// Prober returning queued values, repeating the last one
#[derive(Debug, Clone)]
pub struct FakeProber {
    values: Arc<Mutex<VecDeque<NetworkStatus>>>,
    calls: Arc<AtomicU32>,
    latency: Duration,
}

impl FakeProber {
    pub fn new(values: &[NetworkStatus]) -> Self {
        Self::slow(values, Duration::ZERO)
    }

    /// Every probe after the first takes `latency` to answer
    pub fn slow(values: &[NetworkStatus], latency: Duration) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.iter().copied().collect())),
            calls: Arc::new(AtomicU32::new(0)),
            latency,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NetworkProber for FakeProber {
    async fn probe(&self) -> NetworkStatus {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        if previous > 0 && !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut values = self.values.lock().unwrap();
        if values.len() > 1 {
            values.pop_front().unwrap()
        } else {
            values.front().copied().unwrap_or(NetworkStatus::Unreachable)
        }
    }
}
