//! Child process execution shared by the execution strategies.

use crate::bundler::error::{Error, Result};
use std::{collections::VecDeque, process::Stdio};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};
use tokio_util::sync::CancellationToken;

/// Number of trailing stderr lines kept for error reports.
const STDERR_TAIL_LINES: usize = 20;

/// Runs a prepared command to completion.
///
/// stdout is streamed to the debug log, stderr is logged and its tail kept
/// for the error. Cancellation kills the child and yields [`Error::Cancelled`].
pub(super) async fn run_tool(
    mut command: Command,
    tool: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled {
            tool: tool.to_string(),
        });
    }

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|error| Error::CommandFailed {
        command: tool.to_string(),
        error,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let run = async {
        // Drain both pipes before waiting so the child never blocks on a full pipe
        let (_, stderr_tail) = tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    let mut lines = BufReader::new(stdout).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        log::debug!("[{}] {}", tool, line);
                    }
                }
            },
            async {
                let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
                if let Some(stderr) = stderr {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        log::debug!("[{} stderr] {}", tool, line);
                        if tail.len() == STDERR_TAIL_LINES {
                            tail.pop_front();
                        }
                        tail.push_back(line);
                    }
                }
                tail
            }
        );
        let status = child.wait().await;
        (stderr_tail, status)
    };

    let outcome = tokio::select! {
        _ = cancel.cancelled() => None,
        finished = run => Some(finished),
    };

    let Some((stderr_tail, status)) = outcome else {
        log::warn!("Cancelling {}", tool);
        if let Err(e) = child.kill().await {
            log::warn!("Failed to kill {}: {}", tool, e);
        }
        return Err(Error::Cancelled {
            tool: tool.to_string(),
        });
    };

    let status = status.map_err(|error| Error::CommandFailed {
        command: tool.to_string(),
        error,
    })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            code: status.code(),
            stderr: stderr_tail.into_iter().collect(),
        });
    }

    Ok(())
}
