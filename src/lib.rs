// dwm-status library - public API

// Re-export error types
pub mod error;
pub use error::{Result, StatusError};

// Module declarations
pub mod core;
pub mod platform;
pub mod utils;

use once_cell::sync::OnceCell;
use std::io::Write;
use std::path::Path;

// Re-export commonly used types
pub use crate::core::config::Config;

static PROGRAM_NAME: OnceCell<String> = OnceCell::new();

/// Basename of the invocation path, falling back to the crate name
pub fn program_name() -> &'static str {
    PROGRAM_NAME.get_or_init(|| {
        std::env::args_os()
            .next()
            .as_deref()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    })
}

// Initialize logging; every line is prefixed with the program name
pub fn init_logging() {
    let name = program_name();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(move |buf, record| writeln!(buf, "{}: {}", name, record.args()))
        .init();
}
