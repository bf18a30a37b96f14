//! Builder for constructing Settings.

use super::{BundleSettings, PackageSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building bundler settings with validation.
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
///     .target("x86_64-pc-windows-msvc".into())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_out_directory: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    target: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory installers are written to.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_out_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_out_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets bundle configuration.
    ///
    /// Default: Empty [`BundleSettings`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets target triple.
    ///
    /// If not set, uses the `TARGET` environment variable or current architecture.
    pub fn target(mut self, target: String) -> Self {
        self.target = Some(target);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `project_out_directory`
    /// - `package_settings`
    ///
    /// or if the product name or version is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let target = self.target.unwrap_or_else(|| {
            std::env::var("TARGET").unwrap_or_else(|_| std::env::consts::ARCH.to_string())
        });

        let package = self
            .package_settings
            .context("package_settings is required")?;
        if package.product_name.trim().is_empty() {
            crate::bail!("product_name must not be empty");
        }
        if package.version.trim().is_empty() {
            crate::bail!("version must not be empty");
        }

        Ok(Settings::new(
            package,
            self.bundle_settings,
            self.project_out_directory
                .context("project_out_directory is required")?,
            target,
        ))
    }
}
