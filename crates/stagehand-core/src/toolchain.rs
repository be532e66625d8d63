use std::io;
use std::process::Command;

use crate::config::InstallConfig;
use crate::error::InstallError;

/// Result of running the external build chain.
///
/// The build tool is an opaque collaborator; only its exit status is
/// observed. A non-zero exit is an expected terminal branch, not an error —
/// the installer reacts by skipping deployment, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    /// `step` indexes into [`InstallConfig::build_steps`]; `code` is the
    /// exit code, or `None` if the process was killed by a signal.
    Failure { step: usize, code: Option<i32> },
}

impl BuildOutcome {
    pub fn success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Runs the configured build steps in order, stopping at the first failure.
///
/// Each step is an argv list spawned directly (no shell), with stdio
/// inherited so the build tool's own console output is the only build
/// diagnostics the user sees. Blocks until each step exits; no timeout.
pub fn run_build(config: &InstallConfig) -> Result<BuildOutcome, InstallError> {
    for (step, argv) in config.build_steps.iter().enumerate() {
        let (program, args) = argv.split_first().ok_or_else(|| InstallError::ToolNotRunnable {
            program: String::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty build step"),
        })?;

        log::info!(
            "build step {}/{}: {}",
            step + 1,
            config.build_steps.len(),
            argv.join(" ")
        );

        let status = Command::new(program)
            .args(args)
            .current_dir(&config.source_root)
            .status()
            .map_err(|source| InstallError::ToolNotRunnable {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Ok(BuildOutcome::Failure {
                step,
                code: status.code(),
            });
        }
    }

    Ok(BuildOutcome::Success)
}

#[cfg(test)]
mod toolchain_tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_with_steps(steps: &[&[&str]]) -> InstallConfig {
        let mut config = InstallConfig::for_app("testapp");
        config.source_root = std::env::temp_dir();
        config.build_steps = steps
            .iter()
            .map(|argv| argv.iter().map(|s| s.to_string()).collect())
            .collect();
        config
    }

    #[test]
    fn all_steps_succeed() {
        let config = config_with_steps(&[&["true"], &["true"]]);
        assert_eq!(run_build(&config).unwrap(), BuildOutcome::Success);
    }

    #[test]
    fn no_steps_is_a_trivial_success() {
        let config = config_with_steps(&[]);
        assert_eq!(run_build(&config).unwrap(), BuildOutcome::Success);
    }

    #[test]
    fn failing_step_reports_index_and_code() {
        let config = config_with_steps(&[&["true"], &["false"]]);
        assert_eq!(
            run_build(&config).unwrap(),
            BuildOutcome::Failure { step: 1, code: Some(1) }
        );
    }

    #[test]
    fn failure_short_circuits_later_steps() {
        let marker: PathBuf = std::env::temp_dir().join("stagehand_test_short_circuit.marker");
        let _ = fs::remove_file(&marker);

        let touch = format!("touch {}", marker.display());
        let config = config_with_steps(&[&["false"], &["sh", "-c", &touch]]);

        let outcome = run_build(&config).unwrap();
        assert_eq!(outcome, BuildOutcome::Failure { step: 0, code: Some(1) });
        assert!(!marker.exists(), "step after a failure must not run");
    }

    #[test]
    fn unknown_program_is_an_error() {
        let config = config_with_steps(&[&["stagehand-no-such-tool-xyzzy"]]);
        let err = run_build(&config).unwrap_err();
        assert!(matches!(err, InstallError::ToolNotRunnable { .. }));
    }

    #[test]
    fn empty_argv_is_an_error() {
        let config = config_with_steps(&[&[]]);
        let err = run_build(&config).unwrap_err();
        assert!(matches!(err, InstallError::ToolNotRunnable { .. }));
    }
}
