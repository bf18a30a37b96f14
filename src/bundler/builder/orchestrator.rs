//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs one installer
//! [`Target`] over every requested architecture.

use crate::bundler::{
    BundledArtifact, Result, Settings,
    error::{Context, ErrorExt},
    platform::Target,
    settings::Arch,
};
use std::{path::Path, sync::Arc};

use super::checksum::calculate_sha256;

/// Main bundler orchestrator.
///
/// Builds one artifact per architecture, one after the other, each in its
/// own staging directory. The first failure stops the loop and is returned
/// to the caller.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::{Arch, Bundler, ExecutionStrategy, Settings, WixTarget};
/// use std::{path::Path, sync::Arc};
///
/// # async fn example(settings: Settings) -> kodegen_bundler_msi::bundler::Result<()> {
/// let target = WixTarget::new(
///     settings.clone(),
///     "dist",
///     ExecutionStrategy::for_host().executor(),
/// );
/// let bundler = Bundler::new(settings, Arc::new(target));
///
/// let artifacts = bundler
///     .bundle_archs(Path::new("dist/win-unpacked"), &[Arch::X86_64, Arch::X86])
///     .await?;
/// for artifact in artifacts {
///     println!("{} ({} bytes) {}", artifact.paths[0].display(), artifact.size, artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    target: Arc<dyn Target>,
}

impl Bundler {
    /// Creates a bundler running `target`.
    pub fn new(settings: Settings, target: Arc<dyn Target>) -> Self {
        Self { settings, target }
    }

    /// Builds for the architecture of the configured target triple.
    pub async fn bundle(&self, app_out_dir: &Path) -> Result<Vec<BundledArtifact>> {
        self.bundle_archs(app_out_dir, &[self.settings.binary_arch()])
            .await
    }

    /// Builds one artifact per architecture in `archs`, in order.
    ///
    /// # Returns
    ///
    /// One [`BundledArtifact`] per architecture, with size and SHA-256 of the
    /// finished file.
    pub async fn bundle_archs(
        &self,
        app_out_dir: &Path,
        archs: &[Arch],
    ) -> Result<Vec<BundledArtifact>> {
        let package_type = self.target.package_type();
        let mut artifacts = Vec::with_capacity(archs.len());

        for &arch in archs {
            log::info!("Bundling {} for {}", package_type, arch);
            let path = self
                .target
                .build(app_out_dir, arch)
                .await
                .with_context(|| format!("bundling {package_type} for {arch}"))?;

            // Calculate artifact metadata
            let size = tokio::fs::metadata(&path)
                .await
                .fs_context("reading artifact metadata", &path)?
                .len();
            let checksum = calculate_sha256(&path).await?;

            artifacts.push(BundledArtifact {
                package_type,
                paths: vec![path],
                size,
                checksum,
            });
        }

        Ok(artifacts)
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        Error, PackageSettings, PackageType, SettingsBuilder,
    };
    use async_trait::async_trait;
    use std::{
        path::PathBuf,
        sync::Mutex,
    };

    #[derive(Debug)]
    struct FakeTarget {
        out_dir: PathBuf,
        fail_on: Option<Arch>,
        calls: Mutex<Vec<Arch>>,
    }

    #[async_trait]
    impl Target for FakeTarget {
        fn package_type(&self) -> PackageType {
            PackageType::Msi
        }

        async fn build(&self, _app_out_dir: &Path, arch: Arch) -> Result<PathBuf> {
            self.calls.lock().unwrap().push(arch);
            if self.fail_on == Some(arch) {
                return Err(Error::GenericError("light.exe failed".into()));
            }
            let path = self.out_dir.join(format!("app-{arch}.msi"));
            tokio::fs::write(&path, b"abc").await.unwrap();
            Ok(path)
        }
    }

    fn settings(out: &Path) -> Settings {
        SettingsBuilder::new()
            .project_out_directory(out)
            .package_settings(PackageSettings {
                product_name: "App".into(),
                version: "1.0.0".into(),
                ..Default::default()
            })
            .target("x86_64-pc-windows-msvc".into())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_artifacts_carry_size_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let target = Arc::new(FakeTarget {
            out_dir: dir.path().to_path_buf(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        });
        let bundler = Bundler::new(settings(dir.path()), target.clone());

        let artifacts = bundler
            .bundle_archs(dir.path(), &[Arch::X86_64, Arch::X86])
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].size, 3);
        assert_eq!(artifacts[0].package_type, PackageType::Msi);
        assert_eq!(
            artifacts[1].checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(*target.calls.lock().unwrap(), [Arch::X86_64, Arch::X86]);
    }

    #[tokio::test]
    async fn test_first_failure_stops_remaining_archs() {
        let dir = tempfile::tempdir().unwrap();
        let target = Arc::new(FakeTarget {
            out_dir: dir.path().to_path_buf(),
            fail_on: Some(Arch::X86),
            calls: Mutex::new(Vec::new()),
        });
        let bundler = Bundler::new(settings(dir.path()), target.clone());

        let err = bundler
            .bundle_archs(dir.path(), &[Arch::X86, Arch::AArch64])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("bundling msi for ia32"));
        assert_eq!(*target.calls.lock().unwrap(), [Arch::X86]);
    }

    #[tokio::test]
    async fn test_default_arch_comes_from_target_triple() {
        let dir = tempfile::tempdir().unwrap();
        let target = Arc::new(FakeTarget {
            out_dir: dir.path().to_path_buf(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        });
        let bundler = Bundler::new(settings(dir.path()), target.clone());

        bundler.bundle(dir.path()).await.unwrap();
        assert_eq!(*target.calls.lock().unwrap(), [Arch::X86_64]);
    }
}
