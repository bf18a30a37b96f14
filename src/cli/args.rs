//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! and the runtime configuration derived from it.

use crate::bundler::Arch;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Windows Installer (.msi) bundler driving the WiX toolset
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_msi",
    version,
    about = "Windows Installer (.msi) bundler driving the WiX toolset",
    long_about = "Creates a Windows Installer (.msi) from an application output directory.

Generates ApplicationFiles.wxs describing every file below --app-dir, compiles it
(and any extra WiX sources) with candle.exe and links the MSI with light.exe.
The WiX tools run natively on Windows and through Wine elsewhere.

Usage:
  kodegen_bundler_msi --app-dir dist/win-unpacked --manifest Cargo.toml
  kodegen_bundler_msi --app-dir out/app --product-name \"My App\" --app-version 1.0.0 --arch x64 --arch ia32

Exit code 0 = every requested MSI exists in the output directory."
)]
pub struct Args {
    /// Application output directory to package
    #[arg(short = 'a', long, value_name = "DIR")]
    pub app_dir: PathBuf,

    /// Directory receiving the MSI files (default: parent of --app-dir)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Cargo.toml providing product metadata and [package.metadata.bundle]
    #[arg(short = 'm', long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Product name (overrides the manifest package name)
    #[arg(long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// Product version (overrides the manifest version)
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Target architecture: x64, ia32, arm64 (repeatable)
    #[arg(long = "arch", value_name = "ARCH", value_parser = parse_arch)]
    pub archs: Vec<Arch>,

    /// Main executable file name inside --app-dir
    #[arg(long, value_name = "FILE")]
    pub main_exe: Option<String>,

    /// Extra WiX source compiled by candle.exe (repeatable)
    #[arg(long = "candle-file", value_name = "PATH")]
    pub candle_files: Vec<PathBuf>,

    /// Extra flag for candle.exe (repeatable)
    #[arg(long = "candle-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub candle_flags: Vec<String>,

    /// Extra object linked by light.exe (repeatable)
    #[arg(long = "light-file", value_name = "PATH")]
    pub light_files: Vec<PathBuf>,

    /// Extra flag for light.exe (repeatable)
    #[arg(long = "light-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub light_flags: Vec<String>,

    /// Artifact file name pattern, e.g. "${productName}-${version}-${arch}.${ext}"
    #[arg(long, value_name = "PATTERN")]
    pub artifact_name: Option<String>,

    /// Directory containing candle.exe and light.exe
    #[arg(long, value_name = "DIR", env = "WIX_TOOLSET_DIR")]
    pub toolset_dir: Option<PathBuf>,

    /// How the WiX tools are executed
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Print the created artifacts as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Show detailed progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execution strategy selected on the command line
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Native on Windows, Wine elsewhere
    Auto,
    /// Run the WiX tools directly
    Native,
    /// Run the WiX tools through Wine
    Wine,
}

fn parse_arch(value: &str) -> Result<Arch, String> {
    value.parse().map_err(|e: crate::bundler::Error| e.to_string())
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.app_dir.exists() {
            return Err(format!(
                "App directory does not exist: {}",
                self.app_dir.display()
            ));
        }

        if self.manifest.is_none() && (self.product_name.is_none() || self.app_version.is_none())
        {
            return Err(
                "Either --manifest or both --product-name and --app-version are required"
                    .to_string(),
            );
        }

        if let Some(main_exe) = &self.main_exe {
            if main_exe.contains(['/', '\\']) {
                return Err(format!("--main-exe must be a file name, got {main_exe}"));
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON output owns stdout
        let output = super::OutputManager::new(args.verbose, args.quiet || args.json);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["kodegen_bundler_msi", "--app-dir", "."];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_repeatable_arch_and_hyphenated_flags() {
        let args = parse(&[
            "--manifest",
            "Cargo.toml",
            "--arch",
            "x64",
            "--arch",
            "ia32",
            "--light-flag",
            "-ext",
            "--light-flag",
            "WixUIExtension",
        ]);
        assert_eq!(args.archs, [Arch::X86_64, Arch::X86]);
        assert_eq!(args.light_flags, ["-ext", "WixUIExtension"]);
        assert_eq!(args.strategy, StrategyArg::Auto);
    }

    #[test]
    fn test_product_identity_required_without_manifest() {
        let args = parse(&["--product-name", "App"]);
        assert!(args.validate().unwrap_err().contains("--app-version"));

        let args = parse(&["--product-name", "App", "--app-version", "1.0.0"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_main_exe_must_be_a_file_name() {
        let args = parse(&["--manifest", "Cargo.toml", "--main-exe", "bin/app.exe"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_json_silences_progress_output() {
        let args = parse(&["--manifest", "Cargo.toml", "--json"]);
        assert!(RuntimeConfig::from(&args).output().is_quiet());
    }
}
