// tests/pipeline_test.rs
use std::fs;

use describe_version::config::{Config, VersionSource};
use describe_version::describe::MockDescribe;
use describe_version::strategy::{GitLongStrategy, VersionStrategy};
use describe_version::{Pipeline, Result, Version, VersionError};
use tempfile::TempDir;

fn project() -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("my_pkg")).unwrap();
    root
}

fn git_long_config() -> Config {
    Config {
        version_source: Some(VersionSource::GitLong),
        package_name: Some("my-pkg".to_string()),
        ..Config::default()
    }
}

fn pipeline(root: &TempDir, mock: MockDescribe) -> Pipeline {
    Pipeline::new(root.path()).with_strategy(GitLongStrategy::new(mock))
}

#[test]
fn test_run_writes_version_file() {
    let root = project();
    let derived = pipeline(&root, MockDescribe::output("v1.2-5-gabc123\n"))
        .run(&git_long_config())
        .unwrap()
        .expect("strategy should apply");

    assert_eq!(derived.version.to_string(), "1.2.5+ggabc123");

    let path = root.path().join("my_pkg").join("version.py");
    assert_eq!(derived.target.as_deref(), Some(path.as_path()));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# THIS FILE WAS GENERATED BY \"describe_version::strategy::git::GitLongStrategy\"\n\
         # NEVER EDIT THIS FILE MANUALLY\n\
         \n\
         version_info = (1, 2, 5)\n\
         __version__ = \"1.2.5+ggabc123\"\n"
    );
}

#[test]
fn test_run_twice_is_byte_identical() {
    let root = project();
    let pipeline = pipeline(&root, MockDescribe::output("v0.4-2-gfeed"));
    let path = root.path().join("my_pkg").join("version.py");

    pipeline.run(&git_long_config()).unwrap();
    let first = fs::read(&path).unwrap();
    pipeline.run(&git_long_config()).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_tool_failure_writes_nothing() {
    let root = project();
    let result = pipeline(&root, MockDescribe::exit_code(1)).run(&git_long_config());

    assert!(matches!(
        result,
        Err(VersionError::ToolExecutionFailed { code: Some(1), .. })
    ));
    assert!(!root.path().join("my_pkg").join("version.py").exists());
}

#[test]
fn test_tool_not_found_writes_nothing() {
    let root = project();
    let result = pipeline(&root, MockDescribe::not_found()).run(&git_long_config());

    assert!(matches!(result, Err(VersionError::ToolNotFound { .. })));
    assert!(!root.path().join("my_pkg").join("version.py").exists());
}

#[test]
fn test_parse_failure_writes_nothing() {
    let root = project();
    let result = pipeline(&root, MockDescribe::output("not-a-version")).run(&git_long_config());

    match result {
        Err(VersionError::ParseFailure { text, .. }) => assert_eq!(text, "not-a-version"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!root.path().join("my_pkg").join("version.py").exists());
}

#[test]
fn test_no_applicable_strategy_is_a_no_op() {
    let root = project();
    let mock = MockDescribe::output("v1.0-0-gabc");
    let pipeline = pipeline(&root, mock);

    let config = Config {
        version_source: None,
        ..git_long_config()
    };
    assert_eq!(pipeline.run(&config).unwrap(), None);
    assert!(!root.path().join("my_pkg").join("version.py").exists());
}

#[test]
fn test_missing_package_directory_is_write_failure() {
    let root = TempDir::new().unwrap();
    let result = pipeline(&root, MockDescribe::output("v1.0-0-gabc")).run(&git_long_config());

    assert!(matches!(result, Err(VersionError::FileWriteFailed { .. })));
}

#[test]
fn test_no_write_resolves_only() {
    let root = project();
    let config = Config {
        write_version_file: false,
        ..git_long_config()
    };

    let derived = pipeline(&root, MockDescribe::output("v3.0-1-gabc"))
        .run(&config)
        .unwrap()
        .unwrap();
    assert_eq!(derived.version.to_string(), "3.0.1+ggabc");
    assert!(!root.path().join("my_pkg").join("version.py").exists());
}

struct Fixed(&'static str);

impl VersionStrategy for Fixed {
    fn name(&self) -> &str {
        self.0
    }

    fn applies(&self, _config: &Config) -> bool {
        true
    }

    fn resolve(&self, _config: &Config) -> Result<Version> {
        Version::new(9, 9, 9, "fixed")
    }
}

#[test]
fn test_first_applicable_strategy_wins() {
    let root = project();
    let pipeline = Pipeline::new(root.path())
        .with_strategy(Fixed("first"))
        .with_strategy(GitLongStrategy::new(MockDescribe::output("v1.0-0-gabc")));

    let derived = pipeline.run(&git_long_config()).unwrap().unwrap();
    assert_eq!(derived.provenance, "first");
    assert_eq!(derived.version.to_string(), "9.9.9+gfixed");

    let content = fs::read_to_string(root.path().join("my_pkg").join("version.py")).unwrap();
    assert!(content.starts_with("# THIS FILE WAS GENERATED BY \"first\"\n"));
}

#[test]
fn test_render_matches_written_file() {
    let root = project();
    let pipeline = pipeline(&root, MockDescribe::output("v2.0-0-gabc"));

    let derived = pipeline.run(&git_long_config()).unwrap().unwrap();
    let written = fs::read_to_string(derived.target.as_ref().unwrap()).unwrap();
    assert_eq!(pipeline.render(&derived), written);
}
