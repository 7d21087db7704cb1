//! Version-control "describe" abstraction layer
//!
//! This module provides a trait-based abstraction over running the external
//! describe command, allowing for multiple implementations including the real
//! `git` binary and a scripted mock for testing.
//!
//! # Overview
//!
//! - [DescribeInvoker]: runs the describe command and returns its raw output
//! - [git::GitDescribe]: runs `git describe --long` as a child process
//! - [mock::MockDescribe]: returns canned output without spawning anything
//! - [parser::DescribeParser]: turns raw describe text into a [crate::version::Version]
//!
//! ```rust
//! # use describe_version::describe::{DescribeInvoker, DescribeParser, MockDescribe};
//! # fn example() -> describe_version::Result<()> {
//! let invoker = MockDescribe::output("v1.2-5-gabc123\n");
//! let version = DescribeParser::new("v")?.parse(&invoker.describe()?)?;
//! assert_eq!(version.to_string(), "1.2.5+ggabc123");
//! # Ok(())
//! # }
//! ```

pub mod git;
pub mod mock;
pub mod parser;

pub use git::GitDescribe;
pub use mock::MockDescribe;
pub use parser::{parse_describe, DescribeParser};

use crate::error::Result;

/// Runs a version-control describe command.
///
/// Implementations produce "the nearest ancestor tag, the count of commits since
/// it, and an abbreviated commit identifier, joined by hyphens" as raw text.
///
/// ## Error Handling
///
/// - [crate::error::VersionError::ToolNotFound] when the tool binary is absent,
///   returned before any process is spawned
/// - [crate::error::VersionError::ToolExecutionFailed] when the tool exits non-zero
/// - [crate::error::VersionError::ToolTimedOut] when the tool exceeds its time budget
pub trait DescribeInvoker: Send + Sync {
    /// Name of the external tool, used in diagnostics
    fn tool(&self) -> &str;

    /// Run the describe command and return its raw standard output
    fn describe(&self) -> Result<String>;
}
