use log::debug;
use regex::Regex;

use crate::error::{Result, VersionError};
use crate::version::Version;

/// Matched after the tag prefix: `<digits>.<digits>-<digits>-<token>`.
const DESCRIBE_TAIL: &str = r"(?P<major>[0-9]+)\.(?P<minor>[0-9]+)-(?P<patch>[0-9]+)-(?P<commit>\S+)";

/// Parses raw describe text into a [Version].
///
/// The prefix is a pattern fragment, not a literal, so `v|release-` or `[vV]`
/// both work. The match is anchored at the start of the trimmed text only;
/// anything after the commit token is ignored.
///
/// Capture groups map left to right: first number to `major`, second to
/// `minor`, third (the count after the tag) to `patch`, trailing token to
/// the commit qualifier.
#[derive(Debug, Clone)]
pub struct DescribeParser {
    regex: Regex,
}

impl DescribeParser {
    /// Compiles the pattern for the given tag prefix.
    ///
    /// # Returns
    /// * `Ok(DescribeParser)` - Ready to parse
    /// * `Err(VersionError::InvalidPattern)` - If `prefix` is not a valid pattern fragment
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!("^(?:{}){}", prefix, DESCRIBE_TAIL);
        let regex = Regex::new(&pattern)
            .map_err(|source| VersionError::invalid_pattern(prefix, &source))?;
        Ok(DescribeParser { regex })
    }

    /// The full pattern matched against describe output
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Parses trimmed describe output.
    ///
    /// # Example
    /// ```
    /// # use describe_version::describe::DescribeParser;
    /// let version = DescribeParser::new("v").unwrap().parse("v1.2-5-gabc123\n").unwrap();
    /// assert_eq!((version.major, version.minor, version.patch), (1, 2, 5));
    /// assert_eq!(version.commit(), "gabc123");
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Version> {
        let text = raw.trim();
        debug!("Parsing {:?} with {:?}", text, self.pattern());

        let failure = || VersionError::ParseFailure {
            text: text.to_string(),
            pattern: self.pattern().to_string(),
        };

        let caps = self.regex.captures(text).ok_or_else(failure)?;
        let number = |name: &str| caps[name].parse::<u64>().map_err(|_| failure());

        Version::new(
            number("major")?,
            number("minor")?,
            number("patch")?,
            &caps["commit"],
        )
    }
}

/// Parses describe output with a one-off parser for `prefix`.
pub fn parse_describe(raw: &str, prefix: &str) -> Result<Version> {
    DescribeParser::new(prefix)?.parse(raw)
}
