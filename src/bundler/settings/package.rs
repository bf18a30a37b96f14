//! Package metadata and configuration.

/// Package metadata and configuration.
///
/// Contains the product information that ends up in installer file names and
/// in the generated WiX variables. This typically maps from the `Cargo.toml`
/// `[package]` section.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "My App".into(),
///     version: "1.0.0".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name displayed to users.
    pub product_name: String,

    /// File-system safe product name.
    ///
    /// The main executable is expected to be `{product_filename}.exe`.
    ///
    /// Default: None (derived from `product_name`)
    pub product_filename: Option<String>,

    /// Package name used in safe artifact names (e.g., `my-app`).
    ///
    /// Default: None (derived from `product_name`)
    pub name: Option<String>,

    /// Version string in semantic versioning format.
    pub version: String,

    /// Homepage URL for the application.
    ///
    /// Default: None
    pub homepage: Option<String>,
}
