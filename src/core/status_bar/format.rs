//! Rendering of the status line.
//!
//! The line has a fixed layout:
//!
//! ```text
//! [CPU <i> N%] [GPU <i> N%/N%] [RAM <i> N%] [VOL <i> N%] [BAT <i> N%] <net> <date>
//! ```
//!
//! The GPU segment only appears when a GPU was found at startup. The whole
//! line fits in [`STATUS_BUFFER_SIZE`] bytes including the terminating NUL the
//! root window name ends up with, so the text itself is at most
//! [`MAX_STATUS_LEN`] bytes. Only the date is cut when space runs out.

use std::fmt::Write;

use super::metrics::StatusSnapshot;
use crate::utils::icons;

pub const STATUS_BUFFER_SIZE: usize = 256;
pub const MAX_STATUS_LEN: usize = STATUS_BUFFER_SIZE - 1;

pub fn render_status_line(snapshot: &StatusSnapshot, date_format: &str) -> String {
    let mut line = String::with_capacity(STATUS_BUFFER_SIZE);

    // Writing into a String cannot fail
    let _ = write!(line, "[CPU {} {}%] ", icons::CPU, snapshot.cpu_percent);
    if let Some(gpu) = snapshot.gpu {
        let _ = write!(
            line,
            "[GPU {} {}%/{}%] ",
            icons::GPU,
            gpu.gpu_percent,
            gpu.memory_percent
        );
    }
    let _ = write!(
        line,
        "[RAM {} {}%] [VOL {} {}%] [BAT {} {}%] {} ",
        icons::RAM,
        snapshot.ram_percent,
        snapshot.volume.icon(),
        snapshot.volume.percent,
        snapshot.battery.icon(),
        snapshot.battery.percent,
        snapshot.network.icon(),
    );
    truncate_at_char_boundary(&mut line, MAX_STATUS_LEN);

    let mut date = String::new();
    if write!(date, "{}", snapshot.timestamp.format(date_format)).is_err() {
        log::debug!("date format {:?} could not be rendered", date_format);
        date.clear();
    }
    truncate_at_char_boundary(&mut date, MAX_STATUS_LEN - line.len());
    line.push_str(&date);

    line
}

/// Shorten `s` to at most `max` bytes without splitting a character
fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
