//! Version strategies
//!
//! A strategy decides from configuration whether it should produce the version
//! and, if so, how. Strategies are kept in an ordered list and the first one
//! that applies wins; when none applies, version derivation is skipped.

pub mod git;

pub use git::GitLongStrategy;

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::version::Version;

/// A pluggable source of versions.
pub trait VersionStrategy {
    /// Provenance label recorded in generated files
    fn name(&self) -> &str;

    /// Whether this strategy is selected by `config`. Must not have side effects.
    fn applies(&self, config: &Config) -> bool;

    /// Produces the version. Errors from the underlying tool or parser are
    /// returned unchanged.
    fn resolve(&self, config: &Config) -> Result<Version>;
}

/// Picks the first strategy whose [VersionStrategy::applies] returns true.
pub fn select<'a>(
    strategies: &'a [Box<dyn VersionStrategy>],
    config: &Config,
) -> Option<&'a dyn VersionStrategy> {
    let selected = strategies
        .iter()
        .map(|strategy| strategy.as_ref())
        .find(|strategy| strategy.applies(config));

    match selected {
        Some(strategy) => debug!("Selected version strategy {}", strategy.name()),
        None => debug!("No version strategy applies to {:?}", config.version_source),
    }
    selected
}
