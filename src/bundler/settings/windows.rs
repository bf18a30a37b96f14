//! Windows platform-specific settings.

use std::path::PathBuf;

/// Windows installer configuration.
///
/// Configures MSI creation via WiX with optional Authenticode code signing.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.windows]
/// cert_path = "cert.pem"
/// key_path = "key.pem"
/// timestamp_url = "http://timestamp.digicert.com"
/// ```
///
/// # See Also
///
/// - [`WixSettings`] - WiX MSI installer configuration
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WindowsSettings {
    // === Signing Configuration ===
    /// Path to certificate file (.pem, .crt, .pfx).
    ///
    /// For PKCS#12 (.pfx), also set `password`.
    ///
    /// Default: None (unsigned)
    pub cert_path: Option<PathBuf>,

    /// Path to private key file (.pem, .key).
    ///
    /// Not needed for PKCS#12 (.pfx) files which contain both cert and key.
    ///
    /// Default: None
    pub key_path: Option<PathBuf>,

    /// Password for encrypted key or PKCS#12 file.
    ///
    /// Default: None
    pub password: Option<String>,

    /// Timestamp server URL for signature timestamping.
    ///
    /// Default: None (uses "http://timestamp.digicert.com")
    pub timestamp_url: Option<String>,

    // === Installer Settings ===
    /// WiX MSI installer settings.
    ///
    /// See [`WixSettings`] for details.
    pub wix: WixSettings,
}

/// WiX MSI installer configuration.
///
/// The generated `ApplicationFiles.wxs` fragment only describes the
/// application directory. The product definition itself (the `<Product>`
/// element referencing the `ApplicationFiles` component group and the
/// `INSTALLDIR` directory) is supplied through `candle_files`.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.windows.wix]
/// candle_files = ["wix/Product.wxs"]
/// candle_flags = ["-ext", "WixUIExtension"]
/// light_flags = ["-ext", "WixUIExtension", "-cultures:en-us"]
/// artifact_name = "${productName}-${version}-${arch}.${ext}"
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WixSettings {
    /// Additional sources compiled by `candle.exe`.
    ///
    /// Each produces one `.wxsobj` next to the generated fragment's object.
    ///
    /// Default: Empty
    pub candle_files: Vec<PathBuf>,

    /// Additional flags for every `candle.exe` invocation.
    ///
    /// Default: Empty
    pub candle_flags: Vec<String>,

    /// Additional object files passed to `light.exe`.
    ///
    /// Default: Empty
    pub light_files: Vec<PathBuf>,

    /// Additional flags for the `light.exe` invocation.
    ///
    /// Default: Empty
    pub light_flags: Vec<String>,

    /// Artifact file name pattern.
    ///
    /// Supports `${productName}`, `${name}`, `${version}`, `${arch}` and `${ext}`.
    ///
    /// Default: None (`${productName} ${version}.${ext}`)
    pub artifact_name: Option<String>,

    /// Directory containing `candle.exe` and `light.exe`.
    ///
    /// Default: None (tools are resolved on the executor's PATH)
    pub toolset_dir: Option<PathBuf>,

    /// File name of the main executable inside the app directory.
    ///
    /// The main executable is referenced by the product definition and is
    /// therefore left out of every generated component.
    ///
    /// Default: None (`{product_filename}.exe`)
    pub main_executable: Option<String>,
}
