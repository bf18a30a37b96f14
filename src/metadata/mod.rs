//! Metadata discovery from a single Cargo.toml

use crate::bundler::{BundleSettings, WindowsSettings};
use crate::error::{BundlerError, CliError, Result};
use std::path::{Path, PathBuf};

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// Package name from Cargo.toml
    pub name: String,

    /// Package version from Cargo.toml (e.g., "0.1.0")
    pub version: String,

    /// Homepage URL if specified in Cargo.toml
    pub homepage: Option<String>,
}

/// Complete manifest data from Cargo.toml
#[derive(Debug, Clone)]
pub struct CargoManifest {
    /// Package metadata ([package] section)
    pub metadata: PackageMetadata,

    /// Primary binary name (from [[bin]] or package.name)
    pub binary_name: String,

    /// Bundle settings (from the [package.metadata.bundle] section)
    pub bundle_settings: BundleSettings,
}

/// Load complete manifest from Cargo.toml (single read + parse)
///
/// Relative paths in the bundle settings (WiX sources, objects, toolset
/// directory, certificates) are resolved against the manifest's directory.
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    let toml_value: toml::Value = toml::from_str(&manifest)?;

    let package = toml_value.get("package").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "No [package] section in Cargo.toml".to_string(),
        })
    })?;

    let name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            BundlerError::Cli(CliError::InvalidArguments {
                reason: "Missing 'name' in [package]".to_string(),
            })
        })?
        .to_string();

    let metadata = PackageMetadata {
        version: package
            .get("version")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                BundlerError::Cli(CliError::InvalidArguments {
                    reason: "Missing 'version' in [package]".to_string(),
                })
            })?
            .to_string(),

        homepage: package
            .get("homepage")
            .and_then(|v| v.as_str())
            .map(String::from),

        name,
    };

    // [[bin]] first, package name otherwise
    let binary_name = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("name"))
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| metadata.name.clone());

    let cargo_dir = cargo_toml_path.parent().unwrap_or_else(|| Path::new("."));
    let mut bundle_settings = parse_bundle_settings(&toml_value)?;
    resolve_relative_paths(cargo_dir, &mut bundle_settings.windows);

    Ok(CargoManifest {
        metadata,
        binary_name,
        bundle_settings,
    })
}

/// Parse bundle settings from [package.metadata.bundle] section
fn parse_bundle_settings(toml_value: &toml::Value) -> Result<BundleSettings> {
    let mut settings = BundleSettings::default();

    if let Some(metadata) = toml_value
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get("bundle"))
    {
        if let Some(windows) = metadata.get("windows") {
            settings.windows = windows.clone().try_into::<WindowsSettings>()?;
        }
    }

    Ok(settings)
}

fn resolve_relative_paths(base: &Path, windows: &mut WindowsSettings) {
    let resolve = |path: &mut PathBuf| {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    };

    windows.cert_path.iter_mut().for_each(resolve);
    windows.key_path.iter_mut().for_each(resolve);
    windows.wix.toolset_dir.iter_mut().for_each(resolve);
    windows.wix.candle_files.iter_mut().for_each(resolve);
    windows.wix.light_files.iter_mut().for_each(resolve);
}
