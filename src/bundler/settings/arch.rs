//! CPU architecture types and utilities.

use std::{fmt, str::FromStr};

/// CPU architecture an installer is built for.
///
/// Windows Installer packages only distinguish 32-bit from 64-bit payloads,
/// so the set is limited to the architectures Windows ships on.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::Arch;
///
/// let arch: Arch = "x64".parse().unwrap();
/// assert!(arch.is_win64());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
}

impl Arch {
    /// Short architecture label used in artifact names (`x64`, `ia32`, `arm64`).
    pub fn artifact_label(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x64",
            Arch::X86 => "ia32",
            Arch::AArch64 => "arm64",
        }
    }

    /// Whether components must be marked as 64-bit in the WiX source.
    ///
    /// Only the 32-bit x86 variant installs into the 32-bit program files view.
    pub fn is_win64(&self) -> bool {
        !matches!(self, Arch::X86)
    }

    /// Detects the architecture from a Rust target triple.
    ///
    /// Returns `None` for triples that do not name a Windows-capable CPU.
    pub fn from_target_triple(target: &str) -> Option<Self> {
        if target.starts_with("x86_64") {
            Some(Arch::X86_64)
        } else if target.starts_with("i686") || target.starts_with("i586") {
            Some(Arch::X86)
        } else if target.starts_with("aarch64") {
            Some(Arch::AArch64)
        } else {
            None
        }
    }

    /// Architecture of the machine running the bundler.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "aarch64" => Arch::AArch64,
            _ => Arch::X86_64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact_label())
    }
}

impl FromStr for Arch {
    type Err = crate::bundler::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Ok(Arch::X86_64),
            "ia32" | "x86" | "i686" => Ok(Arch::X86),
            "arm64" | "aarch64" => Ok(Arch::AArch64),
            other => Err(crate::bundler::Error::ArchError(format!(
                "{other} (expected one of: x64, ia32, arm64)"
            ))),
        }
    }
}
