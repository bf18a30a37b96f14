//! Command line interface for the MSI bundler.
//!
//! Parses arguments, assembles [`Settings`] from the manifest and flags,
//! and runs one WiX build per requested architecture.

mod args;
mod output;

pub use args::{Args, RuntimeConfig, StrategyArg};
pub use output::OutputManager;

use crate::{
    bundler::{
        Arch, BundleSettings, Bundler, ExecutionStrategy, LogListener, PackageSettings,
        Settings, SettingsBuilder, WixTarget, builder::HAS_WINE,
        platform::windows::sign::should_sign,
    },
    error::{BundlerError, CliError, Result},
    metadata,
};
use std::{path::PathBuf, sync::Arc};
use tokio_util::sync::CancellationToken;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let output = config.output();

    let settings = build_settings(&args)?;
    let archs = if args.archs.is_empty() {
        vec![settings.binary_arch()]
    } else {
        args.archs.clone()
    };

    let strategy = match args.strategy {
        StrategyArg::Auto => ExecutionStrategy::for_host(),
        StrategyArg::Native => ExecutionStrategy::Native,
        StrategyArg::Wine => ExecutionStrategy::Wine,
    };
    let _ = output.verbose(&format!("Executing WiX toolset: {strategy}"));
    if let Some(warning) = missing_runtime_warning(strategy, *HAS_WINE) {
        let _ = output.warn(warning);
    }
    if should_sign(&settings) {
        let _ = output.verbose("Authenticode signing enabled");
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, cancelling WiX build");
                cancel.cancel();
            }
        })
    };

    let target = WixTarget::new(
        settings.clone(),
        settings.project_out_directory(),
        strategy.executor(),
    )
    .with_listener(Arc::new(LogListener))
    .with_cancellation(cancel);
    let bundler = Bundler::new(settings, Arc::new(target));

    let _ = output.progress(&format!(
        "Building MSI for {}",
        archs
            .iter()
            .map(Arch::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    let result = bundler.bundle_archs(&args.app_dir, &archs).await;
    ctrl_c.abort();

    let artifacts = match result {
        Ok(artifacts) => artifacts,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(1);
        }
    };

    if args.json {
        output.println(&serde_json::to_string_pretty(&artifacts)?)?;
    } else {
        for artifact in &artifacts {
            for path in &artifact.paths {
                let _ = output.success(&path.display().to_string());
            }
            let _ = output.indent(&format!("{} bytes", artifact.size));
            let _ = output.indent(&format!("SHA256: {}", artifact.checksum));
        }
    }

    Ok(0)
}

/// Warning shown when the chosen strategy needs a runtime the host lacks.
fn missing_runtime_warning(strategy: ExecutionStrategy, has_wine: bool) -> Option<&'static str> {
    match strategy {
        ExecutionStrategy::Wine if !has_wine => {
            Some("wine not found in PATH; candle.exe and light.exe will fail to launch")
        }
        _ => None,
    }
}

/// Assembles bundler settings from the manifest (if any) and the flags.
///
/// Flags override manifest values; WiX file and flag lists are appended to
/// the manifest's lists.
pub fn build_settings(args: &Args) -> Result<Settings> {
    let manifest = args
        .manifest
        .as_deref()
        .map(metadata::load_manifest)
        .transpose()?;

    let (mut package, mut bundle) = match &manifest {
        Some(manifest) => (
            PackageSettings {
                product_name: manifest.metadata.name.clone(),
                version: manifest.metadata.version.clone(),
                homepage: manifest.metadata.homepage.clone(),
                ..Default::default()
            },
            manifest.bundle_settings.clone(),
        ),
        None => (PackageSettings::default(), BundleSettings::default()),
    };

    if let Some(product_name) = &args.product_name {
        package.product_name = product_name.clone();
    }
    if let Some(version) = &args.app_version {
        package.version = version.clone();
    }
    if package.product_name.is_empty() {
        return Err(CliError::MissingArgument {
            argument: "--product-name".to_string(),
        }
        .into());
    }

    let wix = &mut bundle.windows.wix;
    wix.candle_files.extend(args.candle_files.iter().cloned());
    wix.candle_flags.extend(args.candle_flags.iter().cloned());
    wix.light_files.extend(args.light_files.iter().cloned());
    wix.light_flags.extend(args.light_flags.iter().cloned());
    if let Some(pattern) = &args.artifact_name {
        wix.artifact_name = Some(pattern.clone());
    }
    if let Some(dir) = &args.toolset_dir {
        wix.toolset_dir = Some(dir.clone());
    }
    if let Some(main_exe) = &args.main_exe {
        wix.main_executable = Some(main_exe.clone());
    } else if wix.main_executable.is_none() {
        if let Some(manifest) = &manifest {
            wix.main_executable = Some(format!("{}.exe", manifest.binary_name));
        }
    }

    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => args
            .app_dir
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut builder = SettingsBuilder::new()
        .project_out_directory(out_dir)
        .package_settings(package)
        .bundle_settings(bundle);
    if let Some(arch) = args.archs.first() {
        builder = builder.target(windows_target_triple(*arch).to_string());
    }

    builder.build().map_err(BundlerError::from)
}

fn windows_target_triple(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64-pc-windows-msvc",
        Arch::X86 => "i686-pc-windows-msvc",
        Arch::AArch64 => "aarch64-pc-windows-msvc",
    }
}
