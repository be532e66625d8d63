//! Stagehand core crate.
//!
//! Owns the install sequence used by the `stagehand` binary: prepare the
//! share directory, stage resource files, run the external build toolchain,
//! and deploy the resulting binary.

pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod toolchain;

pub use config::InstallConfig;
pub use error::InstallError;
pub use install::{InstallReport, Installer};
pub use manifest::Manifest;
pub use toolchain::BuildOutcome;
