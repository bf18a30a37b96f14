//! Configuration structures for bundling operations.
//!
//! This module provides the configuration types for MSI bundling: package
//! metadata, Windows signing and WiX settings, and a builder for
//! constructing validated [`Settings`].

mod arch;
mod builder;
mod bundle;
mod core;
mod package;
mod windows;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use bundle::BundleSettings;
pub use self::core::{DEFAULT_ARTIFACT_NAME, Settings};
pub use package::PackageSettings;
pub use windows::{WindowsSettings, WixSettings};
