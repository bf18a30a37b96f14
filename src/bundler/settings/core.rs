//! Core Settings struct and implementations.

use super::{Arch, BundleSettings, PackageSettings, WixSettings};
use std::path::{Path, PathBuf};

/// Artifact name pattern used when none is configured.
pub const DEFAULT_ARTIFACT_NAME: &str = "${productName} ${version}.${ext}";

/// Main settings for bundler operations.
///
/// Central configuration for the bundler, constructed via [`SettingsBuilder`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_msi::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_out_directory("dist")
///     .package_settings(PackageSettings {
///         product_name: "MyApp".into(),
///         version: "1.0.0".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Bundle configuration.
    bundle_settings: BundleSettings,

    /// Output directory for installers.
    project_out_directory: PathBuf,

    /// Target triple (e.g., "x86_64-pc-windows-msvc").
    target: String,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the file-system safe product name.
    ///
    /// Characters Windows forbids in file names are dropped from the product
    /// name unless an explicit `product_filename` was configured.
    pub fn product_filename(&self) -> String {
        match &self.package.product_filename {
            Some(name) => name.clone(),
            None => sanitize_file_name(&self.package.product_name),
        }
    }

    /// Returns the package name used for safe artifact names.
    pub fn package_name(&self) -> String {
        match &self.package.name {
            Some(name) => name.clone(),
            None => self.package.product_name.to_lowercase().replace(' ', "-"),
        }
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the installer output directory.
    pub fn project_out_directory(&self) -> &Path {
        &self.project_out_directory
    }

    /// Detects the binary architecture from the target triple.
    ///
    /// Falls back to the host architecture for triples that do not name a
    /// Windows-capable CPU.
    pub fn binary_arch(&self) -> Arch {
        Arch::from_target_triple(&self.target).unwrap_or_else(Arch::host)
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the WiX settings.
    pub fn wix(&self) -> &WixSettings {
        &self.bundle_settings.windows.wix
    }

    /// Returns the file name of the application's main executable.
    pub fn main_executable_name(&self) -> String {
        match &self.wix().main_executable {
            Some(name) => name.clone(),
            None => format!("{}.exe", self.product_filename()),
        }
    }

    /// Expands the configured artifact name pattern for `ext` and `arch`.
    pub fn expand_artifact_name(&self, ext: &str, arch: Arch) -> String {
        let pattern = self
            .wix()
            .artifact_name
            .as_deref()
            .unwrap_or(DEFAULT_ARTIFACT_NAME);

        pattern
            .replace("${productName}", &self.product_filename())
            .replace("${name}", &self.package_name())
            .replace("${version}", self.version_string())
            .replace("${arch}", arch.artifact_label())
            .replace("${ext}", ext)
    }

    /// Computes the catalogue-safe artifact name.
    ///
    /// Always `{name}-{version}-{arch}.{ext}` with anything outside
    /// `[A-Za-z0-9._-]` replaced by `-`.
    pub fn compute_safe_artifact_name(&self, ext: &str, arch: Arch) -> String {
        format!(
            "{}-{}-{}.{}",
            self.package_name(),
            self.version_string(),
            arch.artifact_label(),
            ext
        )
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
    }

    /// Returns the package homepage URL.
    pub fn homepage(&self) -> Option<&str> {
        self.package.homepage.as_deref()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle_settings: BundleSettings,
        project_out_directory: PathBuf,
        target: String,
    ) -> Self {
        Self {
            package,
            bundle_settings,
            project_out_directory,
            target,
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect::<String>()
        .trim()
        .to_string()
}
