//! Windows Installer (.msi) bundler library
//!
//! This library generates the WiX source describing an application output
//! directory and drives the WiX toolset (`candle.exe`, `light.exe`) to build
//! an MSI, natively on Windows or through Wine on other hosts.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
