//! Windows Installer (.msi) bundler built on the WiX toolset.
//!
//! This module turns an application output directory into one MSI per
//! architecture: it generates the WiX source describing every file, then
//! runs `candle.exe` and `light.exe` natively on Windows or through Wine
//! elsewhere.
//!
//! # Configuration
//!
//! Bundling is configured via `[package.metadata.bundle]` in `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.bundle.windows]
//! cert_path = "certs/signing.pfx"
//!
//! [package.metadata.bundle.windows.wix]
//! candle_files = ["wix/product.wxs"]
//! light_flags = ["-ext", "WixUIExtension"]
//! ```
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_msi::bundler::{
//!     Arch, Bundler, ExecutionStrategy, PackageSettings, SettingsBuilder, WixTarget,
//! };
//! use std::{path::Path, sync::Arc};
//!
//! # async fn example() -> kodegen_bundler_msi::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_out_directory("dist")
//!     .package_settings(PackageSettings {
//!         product_name: "My App".into(),
//!         version: "1.0.0".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let vm = ExecutionStrategy::for_host().executor();
//! let target = WixTarget::new(settings.clone(), "dist", vm);
//! let bundler = Bundler::new(settings, Arc::new(target));
//! let artifacts = bundler
//!     .bundle_archs(Path::new("dist/win-unpacked"), &[Arch::X86_64])
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod stage;
pub mod utils;
pub mod vm;

// Public re-exports
pub use builder::Bundler;
pub use error::{Error, Result};
pub use platform::{
    ArtifactCreated, ArtifactListener, CollectingListener, LogListener, PackageType, Target,
    windows::{
        sign::{ArtifactSigner, AuthenticodeSigner},
        wix::{BuildPhase, WixBuildArtifact, WixTarget},
    },
};
pub use settings::{
    // Architecture detection
    Arch,
    BundleSettings,
    PackageSettings,
    // Main configuration types
    Settings,
    SettingsBuilder,
    WindowsSettings,
    WixSettings,
};
pub use vm::{ExecutionStrategy, NativeVm, VmExecutor, WineVm};

/// A bundled artifact result containing metadata about a created installer.
///
/// # Fields
///
/// - `package_type`: The format of the created package
/// - `paths`: Files created as part of this bundle (the installer itself)
/// - `size`: Size of the installer in bytes
/// - `checksum`: SHA-256 checksum for integrity verification
#[derive(Debug, Clone, serde::Serialize)]
pub struct BundledArtifact {
    /// The package type that was created.
    pub package_type: PackageType,

    /// Paths to all files created as part of this bundle.
    pub paths: Vec<std::path::PathBuf>,

    /// Size of the installer in bytes.
    pub size: u64,

    /// SHA-256 checksum of the installer.
    pub checksum: String,
}
