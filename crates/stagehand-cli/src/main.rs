use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use stagehand_core::logging::{LoggingConfig, init_logging};
use stagehand_core::{InstallConfig, Installer, Manifest};

const USAGE: &str = "\
Usage: stagehand [OPTIONS] [APP]...

Stages shader resources, runs the external build toolchain, and deploys the
resulting binary for each named application variant.

Options:
  --manifest <path>      read app definitions from a JSON manifest; with no
                         APP arguments, installs every app it defines
  --share-root <path>    resource install root (default /usr/local/share)
  --bin-root <path>      binary install root (default /usr/local/bin)
  --source-root <path>   directory holding shader/ and build/ (default .)
  --strict               exit non-zero when a build fails
  -v, --verbose          debug-level logging
  -h, --help             show this help
";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    apps: Vec<String>,
    manifest: Option<PathBuf>,
    share_root: Option<PathBuf>,
    bin_root: Option<PathBuf>,
    source_root: Option<PathBuf>,
    strict: bool,
    verbose: bool,
    help: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        let mut path_value = |flag: &str| -> Result<PathBuf> {
            args.next()
                .map(PathBuf::from)
                .with_context(|| format!("{flag} requires a path argument"))
        };

        match arg.as_str() {
            "--manifest" => parsed.manifest = Some(path_value("--manifest")?),
            "--share-root" => parsed.share_root = Some(path_value("--share-root")?),
            "--bin-root" => parsed.bin_root = Some(path_value("--bin-root")?),
            "--source-root" => parsed.source_root = Some(path_value("--source-root")?),
            "--strict" => parsed.strict = true,
            "-v" | "--verbose" => parsed.verbose = true,
            "-h" | "--help" => parsed.help = true,
            flag if flag.starts_with('-') => bail!("unknown option `{flag}`\n\n{USAGE}"),
            app => parsed.apps.push(app.to_string()),
        }
    }

    Ok(parsed)
}

/// Resolves CLI arguments into one config per app to install.
fn resolve_configs(args: &CliArgs) -> Result<Vec<InstallConfig>> {
    let mut configs = if let Some(manifest_path) = &args.manifest {
        let manifest = Manifest::load(manifest_path)?;
        let names: Vec<String> = if args.apps.is_empty() {
            manifest.app_names().map(str::to_owned).collect()
        } else {
            args.apps.clone()
        };
        names
            .iter()
            .map(|name| manifest.config_for(name, manifest_path))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        if args.apps.is_empty() {
            bail!("no application named; see --help");
        }
        args.apps
            .iter()
            .map(|name| InstallConfig::for_app(name.as_str()))
            .collect()
    };

    for config in &mut configs {
        if let Some(root) = &args.share_root {
            config.share_root = root.clone();
        }
        if let Some(root) = &args.bin_root {
            config.bin_root = root.clone();
        }
        if let Some(root) = &args.source_root {
            config.source_root = root.clone();
        }
    }

    Ok(configs)
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    init_logging(LoggingConfig {
        default_level: if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        },
        ..LoggingConfig::default()
    });

    let mut build_failures = 0usize;
    for config in resolve_configs(&args)? {
        let app = config.app_name.clone();
        let report = Installer::new(config)
            .run()
            .with_context(|| format!("install of {app} failed"))?;
        if !report.build.success() {
            build_failures += 1;
        }
    }

    // The historical scripts ended cleanly after a failed build; --strict
    // escalates it for CI use.
    if args.strict && build_failures > 0 {
        bail!("{build_failures} build(s) failed");
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        parse_args(argv.iter().map(|s| s.to_string())).unwrap()
    }

    #[test]
    fn apps_and_flags_mix() {
        let args = parse(&["--strict", "3dmv", "rtav"]);
        assert_eq!(args.apps, ["3dmv", "rtav"]);
        assert!(args.strict);
        assert!(args.manifest.is_none());
    }

    #[test]
    fn path_options_take_values() {
        let args = parse(&[
            "--manifest", "install.json",
            "--share-root", "/tmp/share",
            "--bin-root", "/tmp/bin",
            "--source-root", "/src/app",
            "3dmv",
        ]);
        assert_eq!(args.manifest.as_deref(), Some(std::path::Path::new("install.json")));
        assert_eq!(args.share_root.as_deref(), Some(std::path::Path::new("/tmp/share")));
        assert_eq!(args.bin_root.as_deref(), Some(std::path::Path::new("/tmp/bin")));
        assert_eq!(args.source_root.as_deref(), Some(std::path::Path::new("/src/app")));
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse_args(["--share-root".to_string()].into_iter()).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_args(["--frobnicate".to_string()].into_iter()).is_err());
    }

    #[test]
    fn bare_names_build_default_configs() {
        let args = parse(&["3dmv", "rtav"]);
        let configs = resolve_configs(&args).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0], InstallConfig::for_app("3dmv"));
        assert_eq!(configs[1].app_name, "rtav");
    }

    #[test]
    fn root_overrides_apply_to_every_config() {
        let mut args = parse(&["3dmv", "rtav"]);
        args.share_root = Some(PathBuf::from("/tmp/fake/share"));
        let configs = resolve_configs(&args).unwrap();
        assert!(configs.iter().all(|c| c.share_root == PathBuf::from("/tmp/fake/share")));
    }

    #[test]
    fn no_apps_and_no_manifest_is_an_error() {
        let args = parse(&["--strict"]);
        assert!(resolve_configs(&args).is_err());
    }
}
