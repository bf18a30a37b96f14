//! WiX compile and link invocation.
//!
//! `candle.exe` compiles each `.wxs` source into a `.wxsobj` object in the
//! staging directory; `light.exe` links every object into the final MSI.

use crate::bundler::{
    error::{Context, Error, Result},
    utils::fs,
    vm::VmExecutor,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tokio_util::sync::CancellationToken;

/// WiX compiler executable.
pub const CANDLE: &str = "candle.exe";

/// WiX linker executable.
pub const LIGHT: &str = "light.exe";

/// Extension of compiled WiX objects.
const OBJECT_EXTENSION: &str = "wxsobj";

/// Per-build inputs shared by every compile.
#[derive(Debug)]
pub struct CompileContext<'a> {
    /// Application output directory, passed as `AppDir`.
    pub app_dir: &'a Path,
    /// Main executable file name, passed as `MainExeFileName`.
    pub main_exe_file_name: &'a str,
    /// Extra flags appended after the base flags.
    pub candle_flags: &'a [String],
    /// Staging directory receiving the objects.
    pub stage_dir: &'a Path,
}

/// Resolves a WiX tool name for the executor.
///
/// With a toolset directory the tool is addressed by its full path,
/// otherwise the executor looks it up on its own PATH.
pub fn tool_path(vm: &dyn VmExecutor, toolset_dir: Option<&Path>, tool: &str) -> String {
    match toolset_dir {
        Some(dir) => vm.to_vm_path(&dir.join(tool)),
        None => tool.to_string(),
    }
}

/// Object file produced for `source`: same file name, `.wxsobj` extension,
/// placed in the staging directory.
pub fn object_path(stage_dir: &Path, source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .with_context(|| format!("WiX source has no file name: {}", source.display()))?;
    Ok(stage_dir.join(Path::new(file_name).with_extension(OBJECT_EXTENSION)))
}

/// Maps every source to its object, rejecting sources whose objects would collide.
pub fn object_paths(stage_dir: &Path, sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut objects = Vec::with_capacity(sources.len());
    for source in sources {
        let object = object_path(stage_dir, source)?;
        if !seen.insert(object.clone()) {
            crate::bail!(
                "WiX sources compile to the same object {}: rename {}",
                object.display(),
                source.display()
            );
        }
        objects.push(object);
    }
    Ok(objects)
}

/// Arguments for compiling `source` into `object`.
pub fn candle_args(
    vm: &dyn VmExecutor,
    ctx: &CompileContext<'_>,
    object: &Path,
    source: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-nologo".to_string(),
        "-pedantic".to_string(),
        format!("-dAppDir={}", vm.to_vm_path(ctx.app_dir)),
        format!("-dMainExeFileName={}", ctx.main_exe_file_name),
    ];
    args.extend(ctx.candle_flags.iter().cloned());
    args.push("-out".to_string());
    args.push(object.display().to_string());
    args.push(source.display().to_string());
    args
}

/// Arguments for linking `objects` into the artifact.
pub fn light_args(
    vm: &dyn VmExecutor,
    app_size: u64,
    artifact_path: &Path,
    light_flags: &[String],
    objects: &[PathBuf],
) -> Vec<String> {
    let mut args = vec![
        "-nologo".to_string(),
        "-pedantic".to_string(),
        format!("-dAppSize={app_size}"),
        "-spdb".to_string(),
        "-sacl".to_string(),
        "-out".to_string(),
        vm.to_vm_path(artifact_path),
    ];
    args.extend(light_flags.iter().cloned());
    args.extend(objects.iter().map(|object| object.display().to_string()));
    args
}

/// Total byte size of the application payload, measured off the async runtime.
pub async fn payload_size(app_dir: &Path) -> Result<u64> {
    let app_dir = app_dir.to_path_buf();
    tokio::task::spawn_blocking(move || fs::directory_size(&app_dir))
        .await
        .map_err(|e| Error::GenericError(format!("payload size task failed: {e}")))?
}

/// Compiles one source into its object.
pub async fn run_candle(
    vm: &dyn VmExecutor,
    candle: &str,
    ctx: &CompileContext<'_>,
    source: &Path,
    object: &Path,
    cancel: &CancellationToken,
) -> Result<()> {
    log::info!("Running {} on {}", CANDLE, source.display());
    let args = candle_args(vm, ctx, object, source);
    vm.exec(candle, &args, ctx.stage_dir, cancel)
        .await
        .with_context(|| format!("compiling {}", source.display()))
}

/// Links `objects` into `artifact_path`.
#[allow(clippy::too_many_arguments)]
pub async fn run_light(
    vm: &dyn VmExecutor,
    light: &str,
    app_size: u64,
    artifact_path: &Path,
    light_flags: &[String],
    objects: &[PathBuf],
    stage_dir: &Path,
    cancel: &CancellationToken,
) -> Result<()> {
    log::info!(
        "Running {} on {} objects ({} payload bytes)",
        LIGHT,
        objects.len(),
        app_size
    );
    let args = light_args(vm, app_size, artifact_path, light_flags, objects);
    vm.exec(light, &args, stage_dir, cancel)
        .await
        .with_context(|| format!("linking {}", artifact_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::vm::{NativeVm, WineVm};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_object_replaces_extension_in_stage_dir() {
        let object = object_path(Path::new("/stage"), Path::new("/src/product.wxs")).unwrap();
        assert_eq!(object, Path::new("/stage/product.wxsobj"));
    }

    #[test]
    fn test_colliding_objects_are_rejected() {
        let sources = vec![PathBuf::from("/a/main.wxs"), PathBuf::from("/b/main.wxs")];
        let err = object_paths(Path::new("/stage"), &sources).unwrap_err();
        assert!(err.to_string().contains("same object"));
    }

    #[test]
    fn test_candle_args_under_wine() {
        let vm = WineVm::default();
        let flags = strings(&["-ext", "WixUIExtension"]);
        let ctx = CompileContext {
            app_dir: Path::new("/out/win-unpacked"),
            main_exe_file_name: "My App.exe",
            candle_flags: &flags,
            stage_dir: Path::new("/stage"),
        };

        let args = candle_args(
            &vm,
            &ctx,
            Path::new("/stage/ApplicationFiles.wxsobj"),
            Path::new("/stage/ApplicationFiles.wxs"),
        );
        assert_eq!(
            args,
            strings(&[
                "-nologo",
                "-pedantic",
                "-dAppDir=Z:\\out\\win-unpacked",
                "-dMainExeFileName=My App.exe",
                "-ext",
                "WixUIExtension",
                "-out",
                "/stage/ApplicationFiles.wxsobj",
                "/stage/ApplicationFiles.wxs",
            ])
        );
    }

    #[test]
    fn test_light_args_order() {
        let vm = NativeVm;
        let objects = vec![
            PathBuf::from("/extra/ui.wixobj"),
            PathBuf::from("/stage/ApplicationFiles.wxsobj"),
        ];
        let args = light_args(
            &vm,
            1234,
            Path::new("/dist/My App 1.0.0.msi"),
            &strings(&["-cultures:en-us"]),
            &objects,
        );
        assert_eq!(
            args,
            strings(&[
                "-nologo",
                "-pedantic",
                "-dAppSize=1234",
                "-spdb",
                "-sacl",
                "-out",
                "/dist/My App 1.0.0.msi",
                "-cultures:en-us",
                "/extra/ui.wixobj",
                "/stage/ApplicationFiles.wxsobj",
            ])
        );
    }

    #[test]
    fn test_tool_path_resolution() {
        let vm = WineVm::default();
        assert_eq!(tool_path(&vm, None, CANDLE), "candle.exe");
        assert_eq!(
            tool_path(&vm, Some(Path::new("/opt/wix")), LIGHT),
            "Z:\\opt\\wix\\light.exe"
        );
    }

    #[tokio::test]
    async fn test_payload_size_counts_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.exe"), [0u8; 100]).unwrap();
        std::fs::create_dir(dir.path().join("locales")).unwrap();
        std::fs::write(dir.path().join("locales/en.pak"), [0u8; 23]).unwrap();

        assert_eq!(payload_size(dir.path()).await.unwrap(), 123);
    }
}
