//! Build-scoped staging directories.
//!
//! Each MSI build owns one staging directory holding the generated WiX
//! source and the intermediate objects. Names embed the architecture and a
//! random UUID so concurrent builds never share a directory.

use crate::bundler::{
    error::Result,
    settings::Arch,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Temporary directory exclusively owned by one build.
#[derive(Debug)]
pub struct StageDir {
    dir: PathBuf,
}

impl StageDir {
    /// Creates a fresh staging directory under `root`.
    pub async fn create_in(root: &Path, target: &str, arch: Arch) -> Result<Self> {
        let dir = root.join(format!(
            "kodegen-{}-{}-{}",
            target,
            arch.artifact_label(),
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir, true).await?;
        log::debug!("Created staging directory {}", dir.display());
        Ok(Self { dir })
    }

    /// Path of the staging directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a file inside the staging directory.
    pub fn temp_file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Removes the staging directory and everything in it.
    pub async fn cleanup(self) -> Result<()> {
        log::debug!("Removing staging directory {}", self.dir.display());
        fs::remove_dir_all(&self.dir).await
    }
}
