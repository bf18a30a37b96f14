//! Direct execution on a Windows host.

use super::{VmExecutor, process::run_tool};
use crate::bundler::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs tools directly. Paths need no translation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeVm;

#[async_trait]
impl VmExecutor for NativeVm {
    async fn exec(
        &self,
        tool: &str,
        args: &[String],
        cwd: &Path,
        cancel: &CancellationToken,
    ) -> Result<()> {
        log::debug!("Executing {} {}", tool, args.join(" "));
        let mut command = Command::new(tool);
        command.args(args).current_dir(cwd);
        run_tool(command, tool, cancel).await
    }

    fn to_vm_path(&self, path: &Path) -> String {
        path.display().to_string()
    }
}
