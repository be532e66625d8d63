use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::InstallConfig;
use crate::error::InstallError;

/// Install manifest: the application variants a source tree provides.
///
/// Replaces the historical per-application copies of the install script.
/// Every field of an entry other than `name` is optional and falls back to
/// the [`InstallConfig`] defaults.
///
/// ```json
/// {
///   "apps": [
///     { "name": "3dmv" },
///     { "name": "rtav", "resources": ["vert.vs", "frag.fs", "blur.fs"] }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AppEntry {
    pub name: String,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub resource_dir: Option<PathBuf>,
    #[serde(default)]
    pub build_steps: Option<Vec<Vec<String>>>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, InstallError> {
        let text = fs::read_to_string(path).map_err(|e| InstallError::Manifest {
            path: path.to_path_buf(),
            reason: format!("read failed: {e}"),
        })?;

        serde_json::from_str(&text).map_err(|e| InstallError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|app| app.name.as_str())
    }

    /// Builds the config for `name`. `manifest_path` only feeds the error
    /// message when the app is not defined.
    pub fn config_for(&self, name: &str, manifest_path: &Path) -> Result<InstallConfig, InstallError> {
        self.apps
            .iter()
            .find(|app| app.name == name)
            .map(AppEntry::to_config)
            .ok_or_else(|| InstallError::Manifest {
                path: manifest_path.to_path_buf(),
                reason: format!("no app named `{name}`"),
            })
    }
}

impl AppEntry {
    /// Expands the entry into a full config, defaulting unset fields.
    pub fn to_config(&self) -> InstallConfig {
        let mut config = InstallConfig::for_app(self.name.clone());
        if let Some(resources) = &self.resources {
            config.resources = resources.clone();
        }
        if let Some(dir) = &self.resource_dir {
            config.resource_dir = dir.clone();
        }
        if let Some(steps) = &self.build_steps {
            config.build_steps = steps.clone();
        }
        config
    }
}
