//! Version derivation workflow
//!
//! Selects the first applicable strategy, resolves the version, writes the
//! generated version file and hands the version back to the caller. When no
//! strategy applies the workflow does nothing and returns `None`.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::describe::GitDescribe;
use crate::error::{Result, VersionError};
use crate::render::{version_file_path, VersionFileRenderer};
use crate::strategy::{self, GitLongStrategy, VersionStrategy};
use crate::version::Version;

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedVersion {
    /// The resolved version
    pub version: Version,

    /// Name of the strategy that produced it
    pub provenance: String,

    /// Generated file location, `None` when file writing is disabled
    pub target: Option<PathBuf>,
}

impl DerivedVersion {
    /// The version the host applies to the package, as SemVer with `g<commit>` build metadata.
    ///
    /// Fails when the commit qualifier holds characters SemVer build metadata
    /// does not allow; the canonical text is still available from `version`.
    pub fn package_version(&self) -> Result<semver::Version> {
        self.version.to_semver()
    }
}

/// Ordered strategies plus the project they write into.
pub struct Pipeline {
    project_root: PathBuf,
    strategies: Vec<Box<dyn VersionStrategy>>,
    renderer: VersionFileRenderer,
}

impl Pipeline {
    /// Creates an empty pipeline; nothing applies until strategies are added.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Pipeline {
            project_root: project_root.into(),
            strategies: Vec::new(),
            renderer: VersionFileRenderer::new(),
        }
    }

    /// Pipeline with every built-in strategy, running `git` inside `project_root`.
    pub fn standard(project_root: impl Into<PathBuf>, git: GitDescribe) -> Self {
        let project_root = project_root.into();
        let git = git.in_dir(&project_root);
        Pipeline::new(project_root).with_strategy(GitLongStrategy::new(git))
    }

    /// Appends a strategy. Earlier strategies take precedence.
    pub fn with_strategy(mut self, strategy: impl VersionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolves the version without touching the file system.
    ///
    /// # Returns
    /// * `Ok(Some(DerivedVersion))` - A strategy applied and resolved
    /// * `Ok(None)` - No strategy applies to `config`
    /// * `Err` - The selected strategy failed, or the output path cannot be derived
    pub fn resolve(&self, config: &Config) -> Result<Option<DerivedVersion>> {
        let Some(strategy) = strategy::select(&self.strategies, config) else {
            info!("No version strategy configured, skipping version derivation");
            return Ok(None);
        };

        // derive the path first so a config problem does not cost a tool run
        let target = if config.write_version_file {
            Some(self.version_file(config)?)
        } else {
            None
        };

        let version = strategy.resolve(config)?;
        Ok(Some(DerivedVersion {
            version,
            provenance: strategy.name().to_string(),
            target,
        }))
    }

    /// Resolves the version and writes the generated file.
    pub fn run(&self, config: &Config) -> Result<Option<DerivedVersion>> {
        let derived = self.resolve(config)?;

        if let Some(DerivedVersion {
            version,
            provenance,
            target: Some(path),
        }) = &derived
        {
            self.renderer.write(version, provenance, path)?;
        } else if derived.is_some() {
            debug!("Version file writing disabled");
        }

        Ok(derived)
    }

    /// Content that [Pipeline::run] writes for `derived`.
    pub fn render(&self, derived: &DerivedVersion) -> String {
        self.renderer.render(&derived.version, &derived.provenance)
    }

    fn version_file(&self, config: &Config) -> Result<PathBuf> {
        let package_name = config.package_name.as_deref().ok_or_else(|| {
            VersionError::config("package_name is required to write the version file")
        })?;
        Ok(version_file_path(&self.project_root, package_name))
    }
}
