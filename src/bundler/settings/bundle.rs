//! Bundle configuration shared by installer targets.

use super::WindowsSettings;

/// Bundle configuration.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.windows]
/// cert_path = "certs/signing.pfx"
/// ```
///
/// # See Also
///
/// - [`WindowsSettings`] - Windows installer configuration
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BundleSettings {
    /// Windows-specific settings.
    ///
    /// See [`WindowsSettings`] for details.
    #[serde(default)]
    pub windows: WindowsSettings,
}
