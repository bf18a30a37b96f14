//! Windows MSI installer creation using the WiX toolset.
//!
//! Builds a `.msi` from an application output directory in four phases:
//!
//! 1. **Staging** - scan the app directory and write `ApplicationFiles.wxs`
//!    into a fresh staging directory
//! 2. **Compiling** - run `candle.exe` once per WiX source
//! 3. **Linking** - run `light.exe` once over every object
//! 4. **Finalizing** - remove the staging directory, sign, announce the artifact
//!
//! Any failure is fatal for the build. The staging directory is removed on
//! every exit path, and an artifact left by a failed link or finalize step is
//! deleted.
//!
//! # Module Organization
//!
//! - `scan` - directory tree snapshot
//! - `id` - path-derived WiX identifiers
//! - `guid` - component GUID sources
//! - `template` - WiX document templates
//! - `fragment` - `ApplicationFiles.wxs` generation
//! - `build` - candle/light argument construction and invocation

pub mod build;
pub mod fragment;
pub mod guid;
pub mod id;
pub mod scan;
mod template;

use self::guid::{GuidSource, RandomGuids};
use super::sign::{ArtifactSigner, AuthenticodeSigner};
use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    platform::{ArtifactCreated, ArtifactListener, LogListener, PackageType, Target},
    settings::{Arch, Settings},
    stage::StageDir,
    utils::fs,
    vm::VmExecutor,
};
use async_trait::async_trait;
use path_absolutize::Absolutize;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio_util::sync::CancellationToken;

/// File name of the generated WiX source in the staging directory.
pub const APPLICATION_FILES_WXS: &str = "ApplicationFiles.wxs";

/// Phase of one MSI build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildPhase {
    /// Nothing started yet.
    Idle,
    /// Generating and writing the WiX source.
    Staging,
    /// Compiling source number `n` (zero-based).
    Compiling(usize),
    /// Linking every object into the MSI.
    Linking,
    /// Cleaning up, signing and announcing the artifact.
    Finalizing,
    /// Artifact finished.
    Done,
    /// Build aborted. Terminal.
    Failed,
}

impl BuildPhase {
    /// Whether a failure in this phase may leave a partial artifact behind.
    fn may_leave_artifact(self) -> bool {
        matches!(self, BuildPhase::Linking | BuildPhase::Finalizing)
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildPhase::Idle => f.write_str("idle"),
            BuildPhase::Staging => f.write_str("staging"),
            BuildPhase::Compiling(n) => write!(f, "compiling source {}", n + 1),
            BuildPhase::Linking => f.write_str("linking"),
            BuildPhase::Finalizing => f.write_str("finalizing"),
            BuildPhase::Done => f.write_str("done"),
            BuildPhase::Failed => f.write_str("failed"),
        }
    }
}

/// Current phase plus the phases already passed through.
#[derive(Debug)]
struct PhaseTracker {
    arch: Arch,
    history: Vec<BuildPhase>,
}

impl PhaseTracker {
    fn new(arch: Arch) -> Self {
        Self {
            arch,
            history: vec![BuildPhase::Idle],
        }
    }

    fn current(&self) -> BuildPhase {
        self.history
            .last()
            .copied()
            .unwrap_or(BuildPhase::Idle)
    }

    fn enter(&mut self, next: BuildPhase) {
        log::debug!("MSI build ({}): {} -> {}", self.arch, self.current(), next);
        self.history.push(next);
    }
}

/// Outcome of a successful MSI build.
#[derive(Clone, Debug)]
pub struct WixBuildArtifact {
    /// Path of the finished MSI.
    pub target_path: PathBuf,
    /// Catalogue-safe artifact name.
    pub safe_artifact_name: String,
    /// Architecture the MSI targets.
    pub arch: Arch,
    /// Byte size of the application payload passed to the linker.
    pub payload_size: u64,
    /// Every compiled WiX source, in compile order.
    pub sources: Vec<PathBuf>,
    /// Every object passed to the linker, in link order.
    pub objects: Vec<PathBuf>,
    /// Phases the build went through.
    pub phases: Vec<BuildPhase>,
}

/// Intermediate result of the compile and link phases.
struct Linked {
    payload_size: u64,
    sources: Vec<PathBuf>,
    objects: Vec<PathBuf>,
}

/// MSI installer target.
///
/// Collaborators are injected: the executor running the WiX tools, the
/// signer, the listener receiving finished artifacts and the GUID source.
#[derive(Clone, Debug)]
pub struct WixTarget {
    settings: Settings,
    out_dir: PathBuf,
    stage_root: PathBuf,
    vm: Arc<dyn VmExecutor>,
    signer: Arc<dyn ArtifactSigner>,
    listener: Arc<dyn ArtifactListener>,
    guids: Arc<dyn GuidSource>,
    cancel: CancellationToken,
}

impl WixTarget {
    /// Creates a target writing MSIs into `out_dir`.
    ///
    /// Defaults: Authenticode signing from `settings`, a logging listener,
    /// random component GUIDs, staging under the system temp directory and a
    /// token that is never cancelled.
    pub fn new(settings: Settings, out_dir: impl Into<PathBuf>, vm: Arc<dyn VmExecutor>) -> Self {
        Self {
            signer: Arc::new(AuthenticodeSigner::new(settings.clone())),
            settings,
            out_dir: out_dir.into(),
            stage_root: std::env::temp_dir(),
            vm,
            listener: Arc::new(LogListener),
            guids: Arc::new(RandomGuids),
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the artifact signer.
    pub fn with_signer(mut self, signer: Arc<dyn ArtifactSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// Replaces the artifact listener.
    pub fn with_listener(mut self, listener: Arc<dyn ArtifactListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Replaces the component GUID source.
    pub fn with_guid_source(mut self, guids: Arc<dyn GuidSource>) -> Self {
        self.guids = guids;
        self
    }

    /// Creates staging directories under `root` instead of the temp directory.
    pub fn with_stage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.stage_root = root.into();
        self
    }

    /// Aborts running tools when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Directory receiving finished MSIs.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Builds one MSI from `app_out_dir` for `arch`.
    pub async fn build_msi(&self, app_out_dir: &Path, arch: Arch) -> Result<WixBuildArtifact> {
        let ext = PackageType::Msi.extension();
        let artifact_name = self.settings.expand_artifact_name(ext, arch);
        let artifact_path = self.out_dir.join(&artifact_name);
        log::info!(
            "Building MSI {} for {} ({})",
            artifact_path.display(),
            arch,
            self.settings.product_name()
        );

        let mut phases = PhaseTracker::new(arch);
        phases.enter(BuildPhase::Staging);

        if let Err(err) = tokio::fs::create_dir_all(&self.out_dir)
            .await
            .fs_context("creating MSI output directory", &self.out_dir)
        {
            return Err(self.fail(&mut phases, err, None, &artifact_path).await);
        }
        let stage = match StageDir::create_in(
            &self.stage_root,
            PackageType::Msi.short_name(),
            arch,
        )
        .await
        {
            Ok(stage) => stage,
            Err(err) => return Err(self.fail(&mut phases, err, None, &artifact_path).await),
        };

        let linked = match self
            .compile_and_link(app_out_dir, arch, &artifact_path, &stage, &mut phases)
            .await
        {
            Ok(linked) => linked,
            Err(err) => {
                return Err(self.fail(&mut phases, err, Some(stage), &artifact_path).await);
            }
        };

        phases.enter(BuildPhase::Finalizing);
        if let Err(err) = stage.cleanup().await {
            return Err(self.fail(&mut phases, err, None, &artifact_path).await);
        }
        if let Err(err) = self.signer.sign(&artifact_path).await {
            return Err(self.fail(&mut phases, err, None, &artifact_path).await);
        }

        let safe_artifact_name = self.settings.compute_safe_artifact_name(ext, arch);
        self.listener.artifact_created(ArtifactCreated {
            file: artifact_path.clone(),
            arch,
            safe_artifact_name: safe_artifact_name.clone(),
            target: PackageType::Msi,
            is_write_update_info: false,
        });

        phases.enter(BuildPhase::Done);
        log::info!("✓ Created MSI installer: {}", artifact_path.display());

        Ok(WixBuildArtifact {
            target_path: artifact_path,
            safe_artifact_name,
            arch,
            payload_size: linked.payload_size,
            sources: linked.sources,
            objects: linked.objects,
            phases: phases.history,
        })
    }

    async fn compile_and_link(
        &self,
        app_out_dir: &Path,
        arch: Arch,
        artifact_path: &Path,
        stage: &StageDir,
        phases: &mut PhaseTracker,
    ) -> Result<Linked> {
        let wix = self.settings.wix();
        let main_exe = self.settings.main_executable_name();

        let app_dir = absolute(app_out_dir)?;
        let wxs_path = stage.temp_file(APPLICATION_FILES_WXS);
        let document = {
            let app_dir = app_dir.clone();
            let main_exe = main_exe.clone();
            let guids = Arc::clone(&self.guids);
            tokio::task::spawn_blocking(move || {
                fragment::generate_fragment(&app_dir, &main_exe, arch, guids.as_ref())
            })
            .await
            .map_err(|e| Error::GenericError(format!("WiX source generation task failed: {e}")))?
            .context("generating WiX source")?
        };
        tokio::fs::write(&wxs_path, document)
            .await
            .fs_context("writing WiX source", &wxs_path)?;
        log::debug!("Wrote {}", wxs_path.display());

        let mut sources = wix
            .candle_files
            .iter()
            .map(|file| absolute(file))
            .collect::<Result<Vec<_>>>()?;
        sources.push(wxs_path);
        let compiled = build::object_paths(stage.dir(), &sources)?;

        let candle = build::tool_path(self.vm.as_ref(), wix.toolset_dir.as_deref(), build::CANDLE);
        let ctx = build::CompileContext {
            app_dir: &app_dir,
            main_exe_file_name: &main_exe,
            candle_flags: &wix.candle_flags,
            stage_dir: stage.dir(),
        };
        for (n, (source, object)) in sources.iter().zip(&compiled).enumerate() {
            phases.enter(BuildPhase::Compiling(n));
            build::run_candle(self.vm.as_ref(), &candle, &ctx, source, object, &self.cancel)
                .await?;
        }

        phases.enter(BuildPhase::Linking);
        let payload_size = build::payload_size(&app_dir).await?;
        let mut objects = wix
            .light_files
            .iter()
            .map(|file| absolute(file))
            .collect::<Result<Vec<_>>>()?;
        objects.extend(compiled);

        let light = build::tool_path(self.vm.as_ref(), wix.toolset_dir.as_deref(), build::LIGHT);
        build::run_light(
            self.vm.as_ref(),
            &light,
            payload_size,
            artifact_path,
            &wix.light_flags,
            &objects,
            stage.dir(),
            &self.cancel,
        )
        .await?;

        Ok(Linked {
            payload_size,
            sources,
            objects,
        })
    }

    /// Releases build resources after `err` and marks the build failed.
    async fn fail(
        &self,
        phases: &mut PhaseTracker,
        err: Error,
        stage: Option<StageDir>,
        artifact_path: &Path,
    ) -> Error {
        let failed_in = phases.current();
        log::error!("MSI build ({}) failed while {}: {}", phases.arch, failed_in, err);

        if let Some(stage) = stage {
            if let Err(cleanup_err) = stage.cleanup().await {
                log::warn!("Failed to remove staging directory: {}", cleanup_err);
            }
        }
        if failed_in.may_leave_artifact() {
            if let Err(remove_err) = fs::remove_file(artifact_path).await {
                log::warn!("Failed to remove partial artifact: {}", remove_err);
            }
        }

        phases.enter(BuildPhase::Failed);
        Error::Context(
            format!("MSI build failed while {failed_in}"),
            Box::new(err),
        )
    }
}

#[async_trait]
impl Target for WixTarget {
    fn package_type(&self) -> PackageType {
        PackageType::Msi
    }

    async fn build(&self, app_out_dir: &Path, arch: Arch) -> Result<PathBuf> {
        Ok(self.build_msi(app_out_dir, arch).await?.target_path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}
