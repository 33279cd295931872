//! External command invocation shared by the publisher, the prober and the
//! mixer.

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::error::{Result, StatusError};

/// Run `program` to completion and capture its output.
///
/// Spawn failure, a non-zero exit and running past `timeout` are all errors.
/// A child that times out is killed.
pub async fn run(program: &str, args: &[&str], timeout: Duration) -> Result<Output> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| StatusError::CommandSpawn {
            program: program.to_string(),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(StatusError::CommandTimeout {
                program: program.to_string(),
                timeout,
            })
        }
    };

    if !output.status.success() {
        return Err(StatusError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// Like [`run`], returning stdout as text
pub async fn run_stdout(program: &str, args: &[&str], timeout: Duration) -> Result<String> {
    let output = run(program, args, timeout).await?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
