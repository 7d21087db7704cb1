use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use describe_version::config::{self, Config, VersionSource};
use describe_version::describe::GitDescribe;
use describe_version::{ui, DerivedVersion, Pipeline};

#[derive(clap::Parser)]
#[command(
    name = "describe-version",
    version,
    about = "Derive the package version from git describe and write a version file"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        default_value = ".",
        help = "Project root: where git runs and the version file is written"
    )]
    project_root: PathBuf,

    #[arg(long, value_enum, help = "Version source, overrides the config file")]
    source: Option<VersionSource>,

    #[arg(long, help = "Tag prefix pattern, e.g. \"v\"")]
    prefix: Option<String>,

    #[arg(long, help = "Package name the version file directory is derived from")]
    package_name: Option<String>,

    #[arg(long, help = "Seconds to wait for git describe, 0 waits forever")]
    timeout: Option<u64>,

    #[arg(long, help = "Resolve the version without writing the version file")]
    no_write: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Log debug details to stderr")]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(source) = self.source {
            config.version_source = Some(source);
        }
        if let Some(prefix) = &self.prefix {
            config.git_version_prefix = prefix.clone();
        }
        if let Some(name) = &self.package_name {
            config.package_name = Some(name.clone());
        }
        if let Some(secs) = self.timeout {
            config.describe_timeout_secs = secs;
        }
        if self.no_write {
            config.write_version_file = false;
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let git = GitDescribe::discover();
    ui::warn_if_tool_missing(&git);

    let mut config = config::load_config_from(&args.project_root, args.config.as_deref())
        .context("Error loading config")?;
    args.apply_overrides(&mut config);
    debug!("Effective config: {:?}", config);

    let git = git.with_timeout(config.describe_timeout());
    let pipeline = Pipeline::standard(&args.project_root, git);

    if args.dry_run {
        let Some(derived) = pipeline.resolve(&config)? else {
            ui::display_status("No version source configured, nothing to do");
            return Ok(());
        };

        ui::display_status(&format!("Dry run: version would be {}", derived.version));
        if let Some(path) = &derived.target {
            ui::display_file_preview(&path.display().to_string(), &pipeline.render(&derived));
        }
        hand_off(&derived);
        return Ok(());
    }

    let Some(derived) = pipeline.run(&config)? else {
        ui::display_status("No version source configured, nothing to do");
        return Ok(());
    };

    ui::display_status(&format!("Setting version to: {}", derived.version));
    if let Some(path) = &derived.target {
        ui::display_success(&format!("Wrote {}", path.display()));
    }
    hand_off(&derived);

    Ok(())
}

/// Prints the package version alone on the last stdout line for the calling build.
fn hand_off(derived: &DerivedVersion) {
    match derived.package_version() {
        Ok(version) => println!("{}", version),
        Err(e) => {
            ui::display_warning(&format!("{}, passing it through unchanged", e));
            println!("{}", derived.version);
        }
    }
}
