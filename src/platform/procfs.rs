//! Metric readers backed by /proc and /sys.
//!
//! Each reader turns its failures into the `-1` sentinel. Failures are logged
//! when a reader starts failing, not on every tick.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::status_bar::{
    BatteryReading, BatteryState, GpuProvider, GpuUsage, MetricSource, UNAVAILABLE,
};
use crate::error::{Result, StatusError};

/// Remembers whether the last read failed, to log transitions only
#[derive(Debug, Default)]
struct ReaderHealth {
    failing: bool,
}

impl ReaderHealth {
    fn check<T>(&mut self, what: &str, result: Result<T>, fallback: T) -> T {
        match result {
            Ok(value) => {
                if self.failing {
                    log::info!("{} is available again", what);
                    self.failing = false;
                }
                value
            }
            Err(e) => {
                if self.failing {
                    log::debug!("failed to read {}: {}", what, e);
                } else {
                    log::warn!("failed to read {}: {}", what, e);
                    self.failing = true;
                }
                fallback
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        StatusError::metric_collection(format!("failed to open '{}': {}", path.display(), e))
    })
}

/// Aggregate jiffies from the `cpu` line of /proc/stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub busy: u64,
    pub total: u64,
}

impl CpuTimes {
    /// Parse the first line of /proc/stat.
    ///
    /// Busy time is user + nice + system + irq + softirq; idle and iowait
    /// only count towards the total.
    pub fn parse(stat: &str) -> Result<Self> {
        let line = stat
            .lines()
            .next()
            .ok_or_else(|| StatusError::metric_collection("empty /proc/stat"))?;

        let fields = line
            .split_whitespace()
            .skip(1)
            .take(7)
            .map(|f| f.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StatusError::metric_collection(format!("bad cpu line: {}", e)))?;

        if fields.len() != 7 {
            return Err(StatusError::metric_collection(format!(
                "expected 7 cpu fields, got {}",
                fields.len()
            )));
        }

        let busy = fields[0] + fields[1] + fields[2] + fields[5] + fields[6];
        Ok(Self {
            busy,
            total: busy + fields[3] + fields[4],
        })
    }

    /// Busy share in percent between `previous` and `self`
    pub fn usage_since(&self, previous: &CpuTimes) -> i32 {
        let total = self.total.saturating_sub(previous.total);
        if total == 0 {
            return 0;
        }
        let busy = self.busy.saturating_sub(previous.busy);
        (100 * busy / total) as i32
    }
}

/// CPU usage between two consecutive reads
#[derive(Debug)]
pub struct CpuReader {
    path: PathBuf,
    previous: Option<CpuTimes>,
    health: ReaderHealth,
}

impl CpuReader {
    pub fn new() -> Self {
        Self::with_path("/proc/stat")
    }

    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            previous: None,
            health: ReaderHealth::default(),
        }
    }

    fn try_read(&mut self) -> Result<i32> {
        let current = CpuTimes::parse(&read_file(&self.path)?)?;
        let usage = match self.previous {
            Some(previous) => current.usage_since(&previous),
            None => 0,
        };
        self.previous = Some(current);
        Ok(usage)
    }

    /// Usage in percent; 0 on the first read, `-1` on failure
    pub fn read(&mut self) -> i32 {
        let result = self.try_read();
        self.health.check("cpu usage", result, UNAVAILABLE)
    }
}

impl Default for CpuReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse /proc/meminfo into a usage percentage.
///
/// Used memory excludes buffers and page cache.
pub fn parse_meminfo(meminfo: &str) -> Result<i32> {
    let field = |key: &str| -> Result<u64> {
        meminfo
            .lines()
            .find_map(|line| {
                let rest = line.strip_prefix(key)?.strip_prefix(':')?;
                rest.split_whitespace().next()?.parse::<u64>().ok()
            })
            .ok_or_else(|| StatusError::metric_collection(format!("missing {} in meminfo", key)))
    };

    let total = field("MemTotal")?;
    let free = field("MemFree")?;
    let buffers = field("Buffers")?;
    let cached = field("Cached")?;

    if total == 0 {
        return Ok(0);
    }
    let used = total
        .saturating_sub(free)
        .saturating_sub(buffers + cached);
    Ok((100 * used / total) as i32)
}

#[derive(Debug)]
pub struct RamReader {
    path: PathBuf,
    health: ReaderHealth,
}

impl RamReader {
    pub fn new() -> Self {
        Self::with_path("/proc/meminfo")
    }

    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            health: ReaderHealth::default(),
        }
    }

    pub fn read(&mut self) -> i32 {
        let result = read_file(&self.path).and_then(|data| parse_meminfo(&data));
        self.health.check("memory usage", result, UNAVAILABLE)
    }
}

impl Default for RamReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Battery charge from a power_supply directory such as
/// `/sys/class/power_supply/BAT0`
#[derive(Debug)]
pub struct BatteryReader {
    dir: PathBuf,
    health: ReaderHealth,
}

impl BatteryReader {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            health: ReaderHealth::default(),
        }
    }

    fn try_percent(&self) -> Result<i32> {
        let data = read_file(&self.dir.join("capacity"))?;
        data.trim()
            .parse::<i32>()
            .map_err(|e| StatusError::metric_collection(format!("bad battery capacity: {}", e)))
    }

    /// Missing status just means the state is unknown
    fn state(&self) -> BatteryState {
        fs::read_to_string(self.dir.join("status"))
            .map(|s| BatteryState::from_sysfs(&s))
            .unwrap_or_default()
    }

    pub fn read(&mut self) -> BatteryReading {
        let result = self.try_percent();
        let percent = self.health.check("battery capacity", result, UNAVAILABLE);
        BatteryReading {
            percent,
            state: self.state(),
        }
    }
}

/// The readers sampled on every tick
pub struct SystemReaders {
    cpu: CpuReader,
    ram: RamReader,
    battery: BatteryReader,
    gpu: Option<Box<dyn GpuProvider>>,
    gpu_health: ReaderHealth,
}

impl SystemReaders {
    pub fn new(
        cpu: CpuReader,
        ram: RamReader,
        battery: BatteryReader,
        gpu: Option<Box<dyn GpuProvider>>,
    ) -> Self {
        Self {
            cpu,
            ram,
            battery,
            gpu,
            gpu_health: ReaderHealth::default(),
        }
    }
}

impl MetricSource for SystemReaders {
    fn cpu_percent(&mut self) -> i32 {
        self.cpu.read()
    }

    fn ram_percent(&mut self) -> i32 {
        self.ram.read()
    }

    fn battery(&mut self) -> BatteryReading {
        self.battery.read()
    }

    fn gpu(&mut self) -> Option<GpuUsage> {
        let provider = self.gpu.as_mut()?;
        let result = provider.utilization();
        Some(self.gpu_health.check("gpu utilization", result, GpuUsage::UNAVAILABLE))
    }
}
