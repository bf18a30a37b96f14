//! Execution through Wine on non-Windows hosts.

use super::{VmExecutor, process::run_tool};
use crate::bundler::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs tools through `wine`.
///
/// Wine exposes the host root as drive `Z:`, so `/tmp/app` becomes `Z:\tmp\app`.
#[derive(Clone, Debug)]
pub struct WineVm {
    wine: PathBuf,
}

impl WineVm {
    /// Uses a specific wine binary instead of the one on PATH.
    pub fn with_binary(wine: impl Into<PathBuf>) -> Self {
        Self { wine: wine.into() }
    }
}

impl Default for WineVm {
    fn default() -> Self {
        Self {
            wine: PathBuf::from("wine"),
        }
    }
}

#[async_trait]
impl VmExecutor for WineVm {
    async fn exec(
        &self,
        tool: &str,
        args: &[String],
        cwd: &Path,
        cancel: &CancellationToken,
    ) -> Result<()> {
        log::debug!("Executing wine {} {}", tool, args.join(" "));
        let mut command = Command::new(&self.wine);
        command
            .arg(tool)
            .args(args)
            .current_dir(cwd)
            .env("WINEDEBUG", "-all");
        run_tool(command, tool, cancel).await
    }

    fn to_vm_path(&self, path: &Path) -> String {
        format!("Z:{}", path.display().to_string().replace('/', "\\"))
    }
}
