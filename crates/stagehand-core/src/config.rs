use std::path::PathBuf;

/// Everything one install run needs, injected rather than hard-coded.
///
/// The defaults reproduce the classic layout: shader resources under
/// `shader/`, a CMake build into `build/`, installs under `/usr/local`.
/// Tests (and CI) point the roots somewhere disposable instead.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallConfig {
    /// Application variant name. Determines the share-directory name, the
    /// expected build-output name, and the deployed binary name.
    pub app_name: String,
    /// Directory the relative inputs (`resource_dir`, `build_dir`) hang
    /// off, and the working directory for build steps.
    pub source_root: PathBuf,
    pub share_root: PathBuf,
    pub bin_root: PathBuf,
    /// Where resource files live, relative to `source_root`.
    pub resource_dir: PathBuf,
    /// Resource file names, staged strictly in this order.
    pub resources: Vec<String>,
    /// Where the build tool leaves its output, relative to `source_root`.
    pub build_dir: PathBuf,
    /// Build steps as argv lists, run in sequence. The first non-zero exit
    /// stops the chain, like the `&&` it replaces. Never shell-interpreted.
    pub build_steps: Vec<Vec<String>>,
}

impl InstallConfig {
    pub fn for_app(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            source_root: PathBuf::from("."),
            share_root: PathBuf::from("/usr/local/share"),
            bin_root: PathBuf::from("/usr/local/bin"),
            resource_dir: PathBuf::from("shader"),
            resources: vec!["vert.vs".into(), "frag.fs".into()],
            build_dir: PathBuf::from("build"),
            build_steps: vec![
                vec!["cmake".into(), "-B".into(), "build".into()],
                vec!["cmake".into(), "--build".into(), "build".into()],
            ],
        }
    }

    /// `<share-root>/<app-name>`, where resources are staged.
    pub fn share_dir(&self) -> PathBuf {
        self.share_root.join(&self.app_name)
    }

    pub fn resource_src(&self, name: &str) -> PathBuf {
        self.source_root.join(&self.resource_dir).join(name)
    }

    pub fn resource_dst(&self, name: &str) -> PathBuf {
        self.share_dir().join(name)
    }

    /// Where the external build is expected to leave the binary:
    /// `<source-root>/<build-dir>/<app-name>`.
    pub fn build_output(&self) -> PathBuf {
        self.source_root.join(&self.build_dir).join(&self.app_name)
    }

    /// `<bin-root>/<app-name>`, the deployed executable.
    pub fn deploy_target(&self) -> PathBuf {
        self.bin_root.join(&self.app_name)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_match_classic_layout() {
        let config = InstallConfig::for_app("3dmv");
        assert_eq!(config.share_dir(), Path::new("/usr/local/share/3dmv"));
        assert_eq!(config.deploy_target(), Path::new("/usr/local/bin/3dmv"));
        assert_eq!(config.resource_src("vert.vs"), Path::new("./shader/vert.vs"));
        assert_eq!(
            config.resource_dst("frag.fs"),
            Path::new("/usr/local/share/3dmv/frag.fs")
        );
        assert_eq!(config.build_output(), Path::new("./build/3dmv"));
        assert_eq!(config.resources, ["vert.vs", "frag.fs"]);
        assert_eq!(config.build_steps.len(), 2);
        assert_eq!(config.build_steps[0][0], "cmake");
    }

    #[test]
    fn roots_are_injectable() {
        let mut config = InstallConfig::for_app("rtav");
        config.share_root = PathBuf::from("/tmp/fake-root/share");
        config.bin_root = PathBuf::from("/tmp/fake-root/bin");
        config.source_root = PathBuf::from("/tmp/fake-src");
        assert_eq!(config.share_dir(), Path::new("/tmp/fake-root/share/rtav"));
        assert_eq!(config.deploy_target(), Path::new("/tmp/fake-root/bin/rtav"));
        assert_eq!(config.build_output(), Path::new("/tmp/fake-src/build/rtav"));
    }
}
