//! Execution strategies for the WiX toolset.
//!
//! The WiX tools are Windows executables. On a Windows host they run
//! directly ([`NativeVm`]); everywhere else they run through Wine
//! ([`WineVm`]). The strategy is chosen once per build and injected into
//! the target, so tests can substitute their own [`VmExecutor`].
//!
//! # Module Organization
//!
//! - `native` - direct execution
//! - `wine` - execution through Wine with `Z:` drive path mapping
//! - `process` - child process plumbing shared by both

mod native;
mod process;
mod wine;

pub use native::NativeVm;
pub use wine::WineVm;

use crate::bundler::error::Result;
use async_trait::async_trait;
use std::{fmt, path::Path, sync::Arc};
use tokio_util::sync::CancellationToken;

/// Runs external tools on behalf of a build.
#[async_trait]
pub trait VmExecutor: Send + Sync + fmt::Debug {
    /// Runs `tool` with `args` in `cwd` and waits for it to exit.
    ///
    /// Fails on launch errors, nonzero exit, or cancellation.
    async fn exec(
        &self,
        tool: &str,
        args: &[String],
        cwd: &Path,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Maps a host path to a path the executed tool understands.
    fn to_vm_path(&self, path: &Path) -> String;
}

/// How the WiX toolset is executed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionStrategy {
    /// Run the tools directly on the host.
    Native,
    /// Run the tools through Wine.
    Wine,
}

impl ExecutionStrategy {
    /// Picks the strategy matching the host: native on Windows, Wine otherwise.
    pub fn for_host() -> Self {
        if cfg!(target_os = "windows") {
            ExecutionStrategy::Native
        } else {
            ExecutionStrategy::Wine
        }
    }

    /// Creates the executor implementing this strategy.
    pub fn executor(self) -> Arc<dyn VmExecutor> {
        match self {
            ExecutionStrategy::Native => Arc::new(NativeVm),
            ExecutionStrategy::Wine => {
                if !*crate::bundler::builder::HAS_WINE {
                    log::warn!("wine not found in PATH - WiX tool invocations will fail");
                }
                Arc::new(WineVm::default())
            }
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStrategy::Native => f.write_str("native"),
            ExecutionStrategy::Wine => f.write_str("wine"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_strategy() {
        #[cfg(target_os = "windows")]
        assert_eq!(ExecutionStrategy::for_host(), ExecutionStrategy::Native);

        #[cfg(not(target_os = "windows"))]
        assert_eq!(ExecutionStrategy::for_host(), ExecutionStrategy::Wine);
    }
}
