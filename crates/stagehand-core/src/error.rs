use std::fmt;
use std::io;
use std::path::PathBuf;

/// A fault that aborts an install run.
///
/// A build that runs and exits non-zero is deliberately not represented
/// here; that is an expected outcome carried by
/// [`BuildOutcome`](crate::toolchain::BuildOutcome). Only faults that stop
/// the sequence — filesystem errors, a build tool that cannot be launched,
/// a bad manifest — surface as `InstallError`.
#[derive(Debug)]
pub enum InstallError {
    /// A file expected on disk before a copy was absent.
    MissingResource { path: PathBuf },
    /// A filesystem operation failed. `action` names what was being
    /// attempted on `path`.
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// A build step could not be spawned at all (program not found, empty
    /// argv, permission denied on the executable).
    ToolNotRunnable { program: String, source: io::Error },
    /// The manifest could not be read or parsed, or does not define the
    /// requested application.
    Manifest { path: PathBuf, reason: String },
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::MissingResource { path } => {
                write!(f, "missing resource file: {}", path.display())
            }
            InstallError::Io { action, path, source } => {
                write!(f, "failed to {} {}: {}", action, path.display(), source)
            }
            InstallError::ToolNotRunnable { program, source } => {
                write!(f, "could not run build tool `{}`: {}", program, source)
            }
            InstallError::Manifest { path, reason } => {
                write!(f, "manifest {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstallError::Io { source, .. } | InstallError::ToolNotRunnable { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
