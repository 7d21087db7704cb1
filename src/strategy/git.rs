use log::info;

use crate::config::{Config, VersionSource};
use crate::describe::{DescribeInvoker, DescribeParser};
use crate::error::Result;
use crate::strategy::VersionStrategy;
use crate::version::Version;

/// Derives the version from `git describe --long`.
///
/// Selected when the configured source is [VersionSource::GitLong]. The tag
/// prefix pattern comes from `git_version_prefix`.
#[derive(Debug)]
pub struct GitLongStrategy<I> {
    invoker: I,
}

impl<I: DescribeInvoker> GitLongStrategy<I> {
    pub const NAME: &'static str = concat!(module_path!(), "::GitLongStrategy");

    pub fn new(invoker: I) -> Self {
        GitLongStrategy { invoker }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }
}

impl<I: DescribeInvoker> VersionStrategy for GitLongStrategy<I> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn applies(&self, config: &Config) -> bool {
        config.version_source == Some(VersionSource::GitLong)
    }

    fn resolve(&self, config: &Config) -> Result<Version> {
        // compile first so a bad prefix fails without running the tool
        let parser = DescribeParser::new(&config.git_version_prefix)?;
        let raw = self.invoker.describe()?;
        let version = parser.parse(&raw)?;
        info!("{} resolved version {}", self.invoker.tool(), version);
        Ok(version)
    }
}
