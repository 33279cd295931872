//! Display publishers.

use std::io::Write;
use std::time::Duration;

use super::command::run;
use crate::core::status_bar::DisplayPublisher;
use crate::error::Result;

/// Sets the X root window name, which dwm shows as its status text
#[derive(Debug, Clone)]
pub struct XsetrootPublisher {
    timeout: Duration,
}

impl XsetrootPublisher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl DisplayPublisher for XsetrootPublisher {
    async fn publish(&self, line: &str) -> Result<()> {
        run("xsetroot", &["-name", line], self.timeout).await?;
        Ok(())
    }
}

/// Writes one line per refresh to stdout, for bars that read stdin
#[derive(Debug, Clone, Default)]
pub struct StdoutPublisher;

impl DisplayPublisher for StdoutPublisher {
    async fn publish(&self, line: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }
}
