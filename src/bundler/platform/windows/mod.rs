//! Windows bundling support for MSI installers.
//!
//! # Supported Formats
//!
//! - **Windows Installer (.msi)**: via [`wix`] module using the WiX toolset
//!
//! # Build Requirements
//!
//! | Format | Required Tools | Notes |
//! |--------|----------------|-------|
//! | .msi | WiX 3.x (`candle.exe`, `light.exe`) | Runs through Wine on Linux/macOS |
//! | Code Signing | `osslsigncode` or `signtool.exe` | Optional |
//!
//! # Code Signing
//!
//! The [`sign`] module provides Authenticode code signing support.

pub mod sign;
pub mod wix;
