//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs an
//! installer target once per architecture.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Delegates each architecture to the injected target
//! 3. Calculates checksums and sizes
//! 4. Returns [`BundledArtifact`](crate::bundler::BundledArtifact) results
//!
//! # Module Organization
//!
//! - `checksum` - SHA256 checksum calculation for artifacts
//! - `orchestrator` - Main [`Bundler`] struct and bundling operations
//! - `tool_detection` - External tool availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::Bundler;
pub use tool_detection::HAS_WINE;
