//! Windows code signing integration.
//!
//! Finished installers pass through an [`ArtifactSigner`]. The default
//! [`AuthenticodeSigner`] adapts bundler settings to `kodegen_bundler_sign`
//! and skips signing when no certificate is configured.

use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use async_trait::async_trait;
use std::{fmt, path::Path};

/// Signs finished artifacts.
#[async_trait]
pub trait ArtifactSigner: Send + Sync + fmt::Debug {
    /// Signs the artifact in place.
    async fn sign(&self, artifact: &Path) -> Result<()>;
}

/// Authenticode signing via `kodegen_bundler_sign`.
#[derive(Clone, Debug)]
pub struct AuthenticodeSigner {
    settings: Settings,
}

impl AuthenticodeSigner {
    /// Creates a signer reading its certificate configuration from `settings`.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ArtifactSigner for AuthenticodeSigner {
    async fn sign(&self, artifact: &Path) -> Result<()> {
        sign_file(artifact, &self.settings).await
    }
}

/// Sign a Windows installer using kodegen_bundler_sign
///
/// This function:
/// 1. Checks if signing is configured (cert_path present)
/// 2. Builds SignConfig from WindowsSettings
/// 3. Calls kodegen_bundler_sign::windows::sign_binary
/// 4. Generates SHA-256 integrity hash
///
/// # Returns
/// * `Ok(())` - Signing succeeded or was skipped (no cert configured)
/// * `Err(Error::Sign)` - Signing failed
pub async fn sign_file(binary_path: &Path, settings: &Settings) -> Result<()> {
    let windows = &settings.bundle_settings().windows;

    let cert_path = match &windows.cert_path {
        Some(path) => path,
        None => {
            log::info!("No certificate configured (cert_path), skipping Windows signing");
            return Ok(());
        }
    };

    log::info!("Signing {} with Authenticode", binary_path.display());

    let sign_config = kodegen_bundler_sign::windows::SignConfig {
        cert_path: cert_path.clone(),
        key_path: windows.key_path.clone(),
        password: windows.password.clone(),
        timestamp_url: windows
            .timestamp_url
            .clone()
            .or_else(|| Some("http://timestamp.digicert.com".to_string())),
        app_name: Some(settings.product_name().to_string()),
        app_url: settings.homepage().map(|s| s.to_string()),
    };

    kodegen_bundler_sign::windows::sign_binary(binary_path, &sign_config)
        .await
        .map_err(|e| Error::Sign(format!("Windows code signing failed: {}", e)))?;

    let hash = kodegen_bundler_sign::windows::generate_integrity_hash(binary_path)
        .await
        .map_err(|e| Error::Sign(format!("Hash generation failed: {}", e)))?;

    log::info!(
        "✓ Successfully signed {} (SHA-256: {})",
        binary_path.display(),
        hash.get(..16).unwrap_or(hash.as_str())
    );

    Ok(())
}

/// Check if Windows signing is configured
pub fn should_sign(settings: &Settings) -> bool {
    settings.bundle_settings().windows.cert_path.is_some()
}
