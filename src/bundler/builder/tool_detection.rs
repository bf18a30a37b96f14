//! External tool detection and availability checking.
//!
//! The WiX tools themselves are only resolved when invoked. Wine is checked
//! up front so a missing install is reported before the first compile fails.

use std::sync::LazyLock;

/// Check if wine is available for running the WiX toolset on non-Windows hosts.
///
/// Cached result to avoid repeated PATH lookups during multi-arch builds.
pub static HAS_WINE: LazyLock<bool> = LazyLock::new(|| match which::which("wine") {
    Ok(path) => {
        log::debug!("Found wine at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("wine not found in PATH: {}", e);
        false
    }
});
