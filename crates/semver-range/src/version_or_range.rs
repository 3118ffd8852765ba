//! Either a concrete version or a range, as produced by the parser

use std::cmp::Ordering;
use std::fmt;

use crate::range::{Range, RangeError};
use crate::template::Template;
use crate::version::Version;
use crate::version_parser::VersionParser;

/// Result of parsing a string that may hold a version or a range.
///
/// Ordering mixes both kinds: ranges are placed by their bounds, and a range
/// tied with a version sorts before it.
#[derive(Debug, Clone)]
pub enum VersionOrRange {
    Version(Version),
    Range(Range),
}

impl VersionOrRange {
    /// Parse with the default parser
    pub fn parse(input: &str) -> Result<Option<Self>, RangeError> {
        VersionParser::default_ref().parse(input)
    }

    pub fn is_range(&self) -> bool {
        matches!(self, VersionOrRange::Range(_))
    }

    pub fn as_version(&self) -> Option<&Version> {
        match self {
            VersionOrRange::Version(version) => Some(version),
            VersionOrRange::Range(_) => None,
        }
    }

    pub fn as_range(&self) -> Option<&Range> {
        match self {
            VersionOrRange::Version(_) => None,
            VersionOrRange::Range(range) => Some(range),
        }
    }

    /// Check whether a concrete version is accepted.
    ///
    /// A version only accepts itself.
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionOrRange::Version(own) => own.matches(version),
            VersionOrRange::Range(range) => range.matches(version),
        }
    }

    pub fn format(&self, template: &Template) -> String {
        match self {
            VersionOrRange::Version(version) => version.format(template),
            VersionOrRange::Range(range) => range.format(template),
        }
    }
}

impl From<Version> for VersionOrRange {
    fn from(version: Version) -> Self {
        VersionOrRange::Version(version)
    }
}

impl From<Range> for VersionOrRange {
    fn from(range: Range) -> Self {
        VersionOrRange::Range(range)
    }
}

impl Ord for VersionOrRange {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (VersionOrRange::Version(a), VersionOrRange::Version(b)) => a.cmp(b),
            (VersionOrRange::Range(a), VersionOrRange::Range(b)) => a.cmp(b),
            (VersionOrRange::Range(a), VersionOrRange::Version(b)) => a.compare_version(b),
            (VersionOrRange::Version(a), VersionOrRange::Range(b)) => b.compare_version(a).reverse(),
        }
    }
}

impl PartialOrd for VersionOrRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionOrRange {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionOrRange {}

impl fmt::Display for VersionOrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrRange::Version(version) => fmt::Display::fmt(version, f),
            VersionOrRange::Range(range) => fmt::Display::fmt(range, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Operator, Part};

    fn range(major: i64, minor: Part, operator: Option<Operator>) -> VersionOrRange {
        Range::new(Part::Number(major), minor, Part::Wildcard, operator).into()
    }

    #[test]
    fn test_parse() {
        let parsed = VersionOrRange::parse("v1.2.3").unwrap().unwrap();
        assert_eq!(parsed.as_version(), Some(&Version::new(1, 2, 3)));
        assert!(parsed.as_range().is_none());

        let parsed = VersionOrRange::parse("~> v1.2").unwrap().unwrap();
        assert!(parsed.is_range());
        assert_eq!(parsed.as_range().unwrap().operator(), Some(Operator::Pessimistic));

        assert_eq!(VersionOrRange::parse("garbage"), Ok(None));
    }

    #[test]
    fn test_matches() {
        let version: VersionOrRange = Version::new(1, 2, 3).into();
        assert!(version.matches(&Version::new(1, 2, 3)));
        assert!(!version.matches(&Version::new(1, 2, 4)));

        let range = range(1, Part::Number(2), None);
        assert!(range.matches(&Version::new(1, 2, 9)));
        assert!(!range.matches(&Version::new(1, 3, 0)));
    }

    #[test]
    fn test_mixed_ordering() {
        let wildcard = range(1, Part::Number(2), None);
        let low = VersionOrRange::from(Version::new(1, 2, 0));
        let high = VersionOrRange::from(Version::new(1, 3, 0));

        assert!(low < wildcard);
        assert!(wildcard > low);
        assert!(wildcard < high);
        assert!(high > wildcard);
    }

    #[test]
    fn test_range_sorts_before_tied_version() {
        let range: VersionOrRange = Range::new(Part::Number(1), Part::Number(0), Part::Number(0), None).into();
        let version: VersionOrRange = Version::new(1, 0, 0).into();
        assert!(range < version);
        assert!(version > range);
        assert_ne!(range, version);
    }

    #[test]
    fn test_sort() {
        let mut items = vec![
            VersionOrRange::from(Version::new(2, 0, 0)),
            range(1, Part::Wildcard, Some(Operator::Pessimistic)),
            VersionOrRange::from(Version::new(0, 1, 0)),
            range(1, Part::Number(0), None),
        ];
        items.sort();

        let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["v0.1.0", "v1.0.x", "~> v1.x.x", "v2.0.0"]);
    }

    #[test]
    fn test_display() {
        let template = Template::new("%M.%m.%p").unwrap();
        assert_eq!(range(1, Part::Number(2), Some(Operator::Tilde)).format(&template), "~ 1.2.x");
        assert_eq!(VersionOrRange::from(Version::new(1, 2, 3)).to_string(), "v1.2.3");
    }
}
