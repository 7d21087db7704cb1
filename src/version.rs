use crate::error::{Result, VersionError};

/// A release version derived from version-control metadata.
///
/// Rendered as `{major}.{minor}.{patch}+g{commit}`, a semantic version carrying
/// the commit qualifier as build metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    commit: String,
}

impl Version {
    /// Creates a new Version from its numeric components and commit qualifier.
    ///
    /// # Arguments
    /// * `major` - Major version number
    /// * `minor` - Minor version number
    /// * `patch` - Patch version number
    /// * `commit` - Commit qualifier, e.g. an abbreviated commit identifier
    ///
    /// # Returns
    /// * `Ok(Version)` - The constructed version
    /// * `Err(VersionError::InvalidVersion)` - If `commit` is empty
    pub fn new(major: u64, minor: u64, patch: u64, commit: impl Into<String>) -> Result<Self> {
        let commit = commit.into();
        if commit.is_empty() {
            return Err(VersionError::invalid_version(
                "commit qualifier must not be empty",
            ));
        }

        Ok(Version {
            major,
            minor,
            patch,
            commit,
        })
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// The numeric `(major, minor, patch)` tuple written to generated files.
    pub fn version_info(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Converts to a [`semver::Version`] carrying `g<commit>` as build metadata.
    ///
    /// Fails when the commit qualifier contains characters SemVer does not allow
    /// in build metadata.
    pub fn to_semver(&self) -> Result<semver::Version> {
        let build = semver::BuildMetadata::new(&format!("g{}", self.commit)).map_err(|e| {
            VersionError::invalid_version(format!(
                "commit qualifier {:?} is not valid build metadata: {}",
                self.commit, e
            ))
        })?;

        Ok(semver::Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre: semver::Prerelease::EMPTY,
            build,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}+g{}",
            self.major, self.minor, self.patch, self.commit
        )
    }
}
