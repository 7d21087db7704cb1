//! Generated version file
//!
//! The output format is a fixed contract:
//!
//! ```text
//! # THIS FILE WAS GENERATED BY "<provenance>"
//! # NEVER EDIT THIS FILE MANUALLY
//!
//! version_info = (<major>, <minor>, <patch>)
//! __version__ = "<major>.<minor>.<patch>+g<commit>"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, VersionError};
use crate::version::Version;

pub const VERSION_FILE_NAME: &str = "version.py";

/// Import name of a package: lowercased, with `-` and `.` replaced by `_`.
pub fn module_name(package_name: &str) -> String {
    package_name.to_lowercase().replace(['-', '.'], "_")
}

/// Where the version file for `package_name` lives under `root`.
pub fn version_file_path(root: &Path, package_name: &str) -> PathBuf {
    root.join(module_name(package_name)).join(VERSION_FILE_NAME)
}

/// Renders and writes the generated version file.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionFileRenderer;

impl VersionFileRenderer {
    pub fn new() -> Self {
        VersionFileRenderer
    }

    /// Renders the file content. Pure; the same inputs always give the same bytes.
    pub fn render(&self, version: &Version, provenance: &str) -> String {
        let (major, minor, patch) = version.version_info();
        format!(
            "# THIS FILE WAS GENERATED BY \"{}\"\n\
             # NEVER EDIT THIS FILE MANUALLY\n\
             \n\
             version_info = ({}, {}, {})\n\
             __version__ = {}\n",
            provenance,
            major,
            minor,
            patch,
            string_literal(&version.to_string()),
        )
    }

    /// Writes the rendered file to `path`, replacing any existing content.
    ///
    /// The parent directory must already exist. The write is not atomic, but
    /// rerunning with the same inputs produces the same file.
    ///
    /// # Returns
    /// * `Ok(())` - File written
    /// * `Err(VersionError::FileWriteFailed)` - Directory missing, permission denied, etc.
    pub fn write(&self, version: &Version, provenance: &str, path: &Path) -> Result<()> {
        fs::write(path, self.render(version, provenance)).map_err(|source| {
            VersionError::FileWriteFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

// The commit token is any non-whitespace run, so quotes and backslashes must be escaped.
fn string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            literal.push('\\');
        }
        literal.push(c);
    }
    literal.push('"');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROVENANCE: &str = "describe_version::strategy::git::GitLongStrategy";

    fn version() -> Version {
        Version::new(1, 2, 5, "abc123").unwrap()
    }

    #[test]
    fn test_render_exact_content() {
        let content = VersionFileRenderer::new().render(&version(), PROVENANCE);
        assert_eq!(
            content,
            "# THIS FILE WAS GENERATED BY \"describe_version::strategy::git::GitLongStrategy\"\n\
             # NEVER EDIT THIS FILE MANUALLY\n\
             \n\
             version_info = (1, 2, 5)\n\
             __version__ = \"1.2.5+gabc123\"\n"
        );
    }

    #[test]
    fn test_render_escapes_quotes_in_commit() {
        let version = Version::new(0, 1, 0, r#"a"b\c"#).unwrap();
        let content = VersionFileRenderer::new().render(&version, PROVENANCE);
        assert!(content.ends_with("__version__ = \"0.1.0+ga\\\"b\\\\c\"\n"));
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("my-package"), "my_package");
        assert_eq!(module_name("Fancy.Package"), "fancy_package");
        assert_eq!(module_name("plain"), "plain");
    }

    #[test]
    fn test_version_file_path() {
        assert_eq!(
            version_file_path(Path::new("/work"), "my-package"),
            PathBuf::from("/work/my_package/version.py")
        );
    }

    #[test]
    fn test_write_overwrites_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(VERSION_FILE_NAME);
        fs::write(&path, "stale content that is much longer than the new file\n".repeat(10))
            .unwrap();

        let renderer = VersionFileRenderer::new();
        renderer.write(&version(), PROVENANCE, &path).unwrap();
        let first = fs::read(&path).unwrap();
        renderer.write(&version(), PROVENANCE, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(first).unwrap(),
            renderer.render(&version(), PROVENANCE)
        );
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join(VERSION_FILE_NAME);

        let err = VersionFileRenderer::new()
            .write(&version(), PROVENANCE, &path)
            .unwrap_err();
        match err {
            VersionError::FileWriteFailed { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!path.exists());
    }
}
