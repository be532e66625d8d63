use std::fs;
use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::error::InstallError;
use crate::toolchain::{self, BuildOutcome};

/// What an install run actually did.
#[derive(Debug)]
pub struct InstallReport {
    pub share_dir: PathBuf,
    /// Destination paths of the staged resources, in staging order.
    pub staged: Vec<PathBuf>,
    pub build: BuildOutcome,
    /// `Some` only when the build succeeded and the binary was copied.
    pub deployed: Option<PathBuf>,
}

/// Runs the fixed install sequence for one application variant.
///
/// There is no rollback and no atomicity: if staging succeeds but the build
/// fails, the share directory and its resources remain installed while no
/// binary is placed. That end state is intentional.
pub struct Installer {
    config: InstallConfig,
}

impl Installer {
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Ensures `<share-root>/<app-name>` exists, creating intermediate
    /// directories as needed. Succeeds silently if already present.
    pub fn prepare_share_dir(&self) -> Result<PathBuf, InstallError> {
        let dir = self.config.share_dir();
        fs::create_dir_all(&dir).map_err(|source| InstallError::Io {
            action: "create directory",
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Copies each configured resource into the share directory, strictly
    /// in list order, overwriting whatever is already there. A missing
    /// source file stops staging immediately, leaving earlier copies in
    /// place.
    pub fn stage_resources(&self) -> Result<Vec<PathBuf>, InstallError> {
        let mut staged = Vec::with_capacity(self.config.resources.len());

        for name in &self.config.resources {
            let src = self.config.resource_src(name);
            if !src.is_file() {
                return Err(InstallError::MissingResource { path: src });
            }

            let dst = self.config.resource_dst(name);
            fs::copy(&src, &dst).map_err(|source| InstallError::Io {
                action: "copy resource to",
                path: dst.clone(),
                source,
            })?;

            log::debug!("staged {} -> {}", src.display(), dst.display());
            staged.push(dst);
        }

        Ok(staged)
    }

    /// Invokes the external build toolchain and reports its outcome.
    pub fn build(&self) -> Result<BuildOutcome, InstallError> {
        toolchain::run_build(&self.config)
    }

    /// Copies the build output to `<bin-root>/<app-name>`, overwriting any
    /// existing file there.
    pub fn deploy_binary(&self) -> Result<PathBuf, InstallError> {
        let output = self.config.build_output();
        if !output.is_file() {
            return Err(InstallError::MissingResource { path: output });
        }

        let target = self.config.deploy_target();
        fs::copy(&output, &target).map_err(|source| InstallError::Io {
            action: "copy binary to",
            path: target.clone(),
            source,
        })?;

        Ok(target)
    }

    /// The full sequence: prepare, stage, build, deploy.
    ///
    /// Filesystem errors abort immediately and propagate. A failed build is
    /// not an error: deployment is skipped and the run ends normally, with
    /// the staged resources left in place.
    pub fn run(&self) -> Result<InstallReport, InstallError> {
        log::info!("installing {}", self.config.app_name);

        let share_dir = self.prepare_share_dir()?;
        let staged = self.stage_resources()?;
        let build = self.build()?;

        let deployed = match build {
            BuildOutcome::Success => {
                let target = self.deploy_binary()?;
                log::info!("deployed {}", target.display());
                Some(target)
            }
            BuildOutcome::Failure { step, code } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                log::warn!(
                    "build step {} failed (exit {}); skipping deployment of {}",
                    step + 1,
                    code,
                    self.config.app_name
                );
                None
            }
        };

        Ok(InstallReport {
            share_dir,
            staged,
            build,
            deployed,
        })
    }
}
