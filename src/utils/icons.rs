//! Status line glyphs
//!
//! All glyphs live in the Nerd Font private use area, so the bar font
//! must be a patched one for them to render.

use crate::core::status_bar::{BatteryState, NetworkStatus};

pub const CPU: &str = "\u{f2db}";
pub const GPU: &str = "\u{f2db}";
pub const RAM: &str = "\u{f538}";

pub const VOLUME_MUTED: &str = "\u{f6a9}";
pub const VOLUME_LOW: &str = "\u{f6a9}";
pub const VOLUME_MID: &str = "\u{f027}";
pub const VOLUME_HIGH: &str = "\u{f028}";

pub const BATTERY_CHARGING: &str = "\u{f5e7}";
pub const BATTERY_EMPTY: &str = "\u{f244}";
pub const BATTERY_QUARTER: &str = "\u{f243}";
pub const BATTERY_HALF: &str = "\u{f242}";
pub const BATTERY_THREE_QUARTERS: &str = "\u{f241}";
pub const BATTERY_FULL: &str = "\u{f240}";

pub const NETWORK_UP: &str = "\u{f1eb}";
pub const NETWORK_DOWN: &str = "-";

/// Returns the volume glyph for a level in percent
///
/// The sentinel `-1` falls into the lowest tier.
pub fn volume_icon(percent: i32, muted: bool) -> &'static str {
    if muted {
        VOLUME_MUTED
    } else if percent < 25 {
        VOLUME_LOW
    } else if percent < 50 {
        VOLUME_MID
    } else {
        VOLUME_HIGH
    }
}

/// Returns the battery glyph; charging wins over the charge tier
pub fn battery_icon(percent: i32, state: BatteryState) -> &'static str {
    if state == BatteryState::Charging {
        return BATTERY_CHARGING;
    }

    match percent {
        p if p < 20 => BATTERY_EMPTY,
        p if p < 40 => BATTERY_QUARTER,
        p if p < 60 => BATTERY_HALF,
        p if p < 80 => BATTERY_THREE_QUARTERS,
        _ => BATTERY_FULL,
    }
}

pub fn network_icon(status: NetworkStatus) -> &'static str {
    match status {
        NetworkStatus::Reachable => NETWORK_UP,
        NetworkStatus::Unreachable => NETWORK_DOWN,
    }
}
