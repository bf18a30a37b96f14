//! Platform-specific bundling implementations.
//!
//! Every installer format is a [`Target`]: something that turns an
//! application output directory into one installer artifact for one
//! architecture. Finished artifacts are announced to an
//! [`ArtifactListener`].
//!
//! # Supported Targets
//!
//! | Platform | Package Types | Module |
//! |----------|--------------|---------|
//! | Windows | .msi (WiX) | [`windows::wix`] |

pub mod windows;

use crate::bundler::{error::Result, settings::Arch};
use async_trait::async_trait;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Supported package types for bundling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PackageType {
    /// Windows Installer package (.msi) built with the WiX toolset.
    Msi,
}

impl PackageType {
    /// Returns the short name for this package type.
    ///
    /// This is the lowercase identifier used in CLI output and file paths.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::Msi => "msi",
        }
    }

    /// File extension of artifacts of this type.
    pub fn extension(&self) -> &'static str {
        match self {
            PackageType::Msi => "msi",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// An installer format that can be built.
#[async_trait]
pub trait Target: Send + Sync + fmt::Debug {
    /// The package type this target produces.
    fn package_type(&self) -> PackageType;

    /// Builds one installer from `app_out_dir` for `arch`.
    ///
    /// Returns the path of the finished artifact.
    async fn build(&self, app_out_dir: &Path, arch: Arch) -> Result<PathBuf>;
}

/// Notification sent once an artifact is finished and signed.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct ArtifactCreated {
    /// Path of the artifact.
    pub file: PathBuf,
    /// Architecture the artifact was built for.
    pub arch: Arch,
    /// Sanitized name for downstream cataloguing.
    pub safe_artifact_name: String,
    /// Target that produced the artifact.
    pub target: PackageType,
    /// Whether update metadata should be written for this artifact.
    pub is_write_update_info: bool,
}

/// Receives finished artifacts.
pub trait ArtifactListener: Send + Sync + fmt::Debug {
    /// Called once per finished artifact.
    fn artifact_created(&self, event: ArtifactCreated);
}

/// Listener that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogListener;

impl ArtifactListener for LogListener {
    fn artifact_created(&self, event: ArtifactCreated) {
        log::info!(
            "Artifact created: {} ({}, {})",
            event.file.display(),
            event.arch,
            event.safe_artifact_name
        );
    }
}

/// Listener that keeps every event, for callers that report at the end.
#[derive(Debug, Default)]
pub struct CollectingListener {
    events: Mutex<Vec<ArtifactCreated>>,
}

impl CollectingListener {
    /// Returns the events received so far.
    pub fn events(&self) -> Vec<ArtifactCreated> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ArtifactListener for CollectingListener {
    fn artifact_created(&self, event: ArtifactCreated) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
