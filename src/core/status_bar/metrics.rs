use chrono::{DateTime, Local};

use crate::utils::icons;

/// Value a metric reader returns when it has nothing to report
pub const UNAVAILABLE: i32 = -1;

/// Everything one status line is rendered from
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub timestamp: DateTime<Local>,
    pub cpu_percent: i32,
    pub ram_percent: i32,
    pub battery: BatteryReading,
    pub volume: VolumeStatus,
    pub network: NetworkStatus,
    /// `None` when no GPU was found at startup
    pub gpu: Option<GpuUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryReading {
    pub percent: i32,
    pub state: BatteryState,
}

impl BatteryReading {
    pub const UNAVAILABLE: Self = Self {
        percent: UNAVAILABLE,
        state: BatteryState::Unknown,
    };

    pub fn icon(&self) -> &'static str {
        icons::battery_icon(self.percent, self.state)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatteryState {
    Charging,
    Discharging,
    Full,
    NotCharging,
    #[default]
    Unknown,
}

impl BatteryState {
    /// Parse the content of a power_supply `status` attribute
    pub fn from_sysfs(status: &str) -> Self {
        match status.trim() {
            "Charging" => BatteryState::Charging,
            "Discharging" => BatteryState::Discharging,
            "Full" => BatteryState::Full,
            "Not charging" => BatteryState::NotCharging,
            _ => BatteryState::Unknown,
        }
    }
}

/// Volume level together with the mute switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStatus {
    pub percent: i32,
    pub muted: bool,
}

impl VolumeStatus {
    pub const UNAVAILABLE: Self = Self {
        percent: UNAVAILABLE,
        muted: false,
    };

    pub fn icon(&self) -> &'static str {
        icons::volume_icon(self.percent, self.muted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Reachable,
    Unreachable,
}

impl NetworkStatus {
    pub fn icon(&self) -> &'static str {
        icons::network_icon(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuUsage {
    pub gpu_percent: i32,
    pub memory_percent: i32,
}

impl GpuUsage {
    pub const UNAVAILABLE: Self = Self {
        gpu_percent: UNAVAILABLE,
        memory_percent: UNAVAILABLE,
    };
}
