use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionError};

/// Dedicated configuration file name, looked up in the project root and the user config dir.
pub const CONFIG_FILE_NAME: &str = "describe-version.toml";

/// Project manifest that may carry a `[tool.describe-version]` table.
pub const MANIFEST_FILE_NAME: &str = "pyproject.toml";

const TOOL_TABLE: &str = "describe-version";

/// Which strategy should produce the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    /// `git describe --long`
    GitLong,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::GitLong => f.write_str("git-long"),
        }
    }
}

/// Represents the complete configuration for describe-version.
///
/// Contains the strategy selector, the tag prefix pattern and output settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default, alias = "version_plugin", skip_serializing_if = "Option::is_none")]
    pub version_source: Option<VersionSource>,

    #[serde(default = "default_git_version_prefix")]
    pub git_version_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default = "default_describe_timeout_secs")]
    pub describe_timeout_secs: u64,

    #[serde(default = "default_write_version_file")]
    pub write_version_file: bool,
}

fn default_git_version_prefix() -> String {
    "v".to_string()
}

fn default_describe_timeout_secs() -> u64 {
    30
}

fn default_write_version_file() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_source: None,
            git_version_prefix: default_git_version_prefix(),
            package_name: None,
            describe_timeout_secs: default_describe_timeout_secs(),
            write_version_file: default_write_version_file(),
        }
    }
}

impl Config {
    /// Time budget for the describe command; `None` when disabled with `0`.
    pub fn describe_timeout(&self) -> Option<Duration> {
        match self.describe_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Loads configuration relative to the current directory.
///
/// See [load_config_from].
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_config_from(Path::new("."), config_path)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `describe-version.toml` in `root`
/// 3. `pyproject.toml` in `root`
/// 4. `describe-version.toml` in the user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(VersionError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config_from(root: &Path, config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config_file(Path::new(path));
    }

    for candidate in [root.join(CONFIG_FILE_NAME), root.join(MANIFEST_FILE_NAME)] {
        if candidate.exists() {
            return read_config_file(&candidate);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE_NAME);
        if user_config.exists() {
            return read_config_file(&user_config);
        }
    }

    info!("No config file found, using defaults");
    Ok(Config::default())
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        VersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&content)
        .map_err(|e| VersionError::config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded config from: {}", path.display());
    Ok(config)
}

/// Parses configuration text.
///
/// Accepts either a dedicated file with settings at the top level, or a project
/// manifest with a `[tool.describe-version]` table. In the manifest form a
/// missing `package_name` falls back to `[project].name`, then `[tool.poetry].name`.
pub fn parse_config(content: &str) -> std::result::Result<Config, String> {
    let mut doc: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| one_line(e.message()))?;

    let is_manifest = doc.contains_key("tool") || doc.contains_key("project");
    let manifest_name = manifest_package_name(&doc);

    let tool_table = doc
        .get_mut("tool")
        .and_then(toml::Value::as_table_mut)
        .and_then(|tool| tool.remove(TOOL_TABLE));

    let table = match tool_table {
        Some(toml::Value::Table(table)) => table,
        Some(_) => return Err(format!("[tool.{}] must be a table", TOOL_TABLE)),
        None if is_manifest => toml::Table::new(),
        None => doc,
    };

    let mut config: Config = toml::Value::Table(table)
        .try_into::<Config>()
        .map_err(|e| one_line(e.message()))?;

    if config.package_name.is_none() && is_manifest {
        config.package_name = manifest_name;
    }

    debug!("Parsed config: {:?}", config);
    Ok(config)
}

fn one_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn manifest_package_name(doc: &toml::Table) -> Option<String> {
    let project = doc.get("project").and_then(|project| project.get("name"));
    let poetry = doc
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .and_then(|poetry| poetry.get("name"));

    project.or(poetry).and_then(toml::Value::as_str).map(str::to_string)
}
