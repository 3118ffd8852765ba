//! A version range: optional operator plus three wildcard-or-number parts

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use super::{Operator, Part};
use crate::template::{Template, TemplateError};
use crate::version::{bump_numeric, Component, Version, VersionError};
use crate::version_or_range::VersionOrRange;
use crate::version_parser::VersionParser;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid range part \"{0}\", expected a non-negative integer, \"x\" or \"*\"")]
    InvalidPart(String),
    #[error("Invalid comparison operator \"{0}\"")]
    InvalidOperator(String),
    #[error("A range cannot have prerelease or metadata strings: \"{0}\"")]
    PrereleaseOrMetadata(String),
    #[error("Matching a range against another range is not supported")]
    RangeMembership,
    #[error("Could not parse \"{0}\" as a version or range")]
    Unparsable(String),
    #[error("Cannot increment the {0} part of a range, it is a wildcard")]
    WildcardIncrement(Component),
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// A constraint over versions such as `~> 1.2`, `1.2.x` or `>= 1.0.0`.
///
/// Equality and ordering are defined by the bounds of the range, not by its
/// stored fields: `1.2.x == 1.2.*` and `=1.2.3 == 1.2.3`.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    major: Part,
    minor: Part,
    patch: Part,
    operator: Option<Operator>,
}

impl Range {
    pub fn new(major: Part, minor: Part, patch: Part, operator: Option<Operator>) -> Self {
        Range {
            major,
            minor,
            patch,
            operator,
        }
    }

    /// Build a range from textual parts, e.g. `("1", "2", "*", Some("~>"))`
    pub fn from_tokens(
        major: &str,
        minor: &str,
        patch: &str,
        operator: Option<&str>,
    ) -> Result<Self, RangeError> {
        let operator = operator.map(str::parse::<Operator>).transpose()?;
        Ok(Range::new(major.parse()?, minor.parse()?, patch.parse()?, operator))
    }

    /// The range accepting every version
    pub fn any() -> Self {
        Range::new(Part::Wildcard, Part::Wildcard, Part::Wildcard, None)
    }

    /// Parse a range with the default parser, even if it does not look like one
    pub fn parse(input: &str) -> Result<Option<Self>, RangeError> {
        VersionParser::default_ref().parse_range(input)
    }

    pub fn major(&self) -> Part {
        self.major
    }

    pub fn minor(&self) -> Part {
        self.minor
    }

    pub fn patch(&self) -> Part {
        self.patch
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// `[major, minor, patch]`
    pub fn parts(&self) -> [Part; 3] {
        [self.major, self.minor, self.patch]
    }

    /// `(major, minor, patch, operator)`
    pub fn components(&self) -> (Part, Part, Part, Option<Operator>) {
        (self.major, self.minor, self.patch, self.operator)
    }

    pub fn non_wildcard_parts(&self) -> Vec<i64> {
        self.parts().iter().filter_map(Part::number).collect()
    }

    pub fn has_wildcard(&self) -> bool {
        self.parts().iter().any(Part::is_wildcard)
    }

    pub fn accepts_any_version(&self) -> bool {
        self.parts().iter().all(Part::is_wildcard)
    }

    pub fn has_operator(&self) -> bool {
        self.operator.is_some()
    }

    pub fn is_approximate(&self) -> bool {
        self.operator.is_some_and(|op| op.is_approximate())
    }

    /// Index of the last part that is not a wildcard
    pub(crate) fn last_non_wildcard(&self) -> Option<usize> {
        self.parts().iter().rposition(|p| !p.is_wildcard())
    }

    /// The range read as a plain version, wildcards replaced by zero
    pub fn zero_filled(&self) -> Version {
        Version::from_numeric(self.parts().map(|p| p.zero_filled()))
    }

    /// Return a new range with one part bumped.
    ///
    /// Without an explicit component the last non-wildcard part is bumped.
    /// Wildcards survive the increment, so `1.2.x` becomes `1.3.x`.
    pub fn increment(&self, component: Option<Component>) -> Result<Self, RangeError> {
        let mut next = *self;
        next.increment_mut(component)?;
        Ok(next)
    }

    /// In-place variant of [`Range::increment`]
    pub fn increment_mut(&mut self, component: Option<Component>) -> Result<&mut Self, RangeError> {
        if self.accepts_any_version() {
            return Ok(self);
        }

        let index = match component {
            Some(component) => component.index().ok_or(VersionError::UnsupportedIncrement)?,
            None => match self.last_non_wildcard() {
                Some(index) => index,
                None => return Ok(self),
            },
        };
        let component = Component::from_index(index);

        let parts = self.parts();
        if parts[index].is_wildcard() {
            return Err(RangeError::WildcardIncrement(component));
        }

        let bumped = bump_numeric(parts.map(|p| p.zero_filled()), index, component)?;

        let mut next = parts;
        for (slot, value) in next.iter_mut().zip(bumped) {
            if !slot.is_wildcard() {
                *slot = Part::Number(value);
            }
        }

        [self.major, self.minor, self.patch] = next;
        Ok(self)
    }

    /// Check whether a concrete version lies inside the range.
    ///
    /// Membership is the half-open interval `[lower_bound, upper_bound)`.
    /// For an exact range such as `1.2.3` or `=1.2.3` both bounds are equal,
    /// so it matches no version at all.
    pub fn matches(&self, version: &Version) -> bool {
        if self.accepts_any_version() {
            return true;
        }
        self.lower_bound() <= *version && *version < self.upper_bound()
    }

    /// Check whether a version string lies inside the range.
    ///
    /// Strings that parse as a range are rejected with
    /// [`RangeError::RangeMembership`].
    pub fn matches_str(&self, input: &str) -> Result<bool, RangeError> {
        match VersionParser::default_ref().parse(input)? {
            Some(target) => self.matches_any(&target),
            None => Err(RangeError::Unparsable(input.to_string())),
        }
    }

    pub fn matches_any(&self, target: &VersionOrRange) -> Result<bool, RangeError> {
        match target {
            VersionOrRange::Version(version) => Ok(self.matches(version)),
            VersionOrRange::Range(_) => Err(RangeError::RangeMembership),
        }
    }

    /// Render the range through a template, prefixed by `"<operator> "`
    pub fn format(&self, template: &Template) -> String {
        let body = template.render(&self.major, &self.minor, &self.patch, None, None);
        match self.operator {
            Some(operator) => format!("{} {}", operator, body),
            None => body,
        }
    }

    /// Order a range against a plain version.
    ///
    /// Never returns `Equal`: a range tied with a version sorts first.
    pub fn compare_version(&self, version: &Version) -> Ordering {
        self.upper_bound_inclusive()
            .cmp(version)
            .then_with(|| self.lower_bound().cmp(version))
            .then(Ordering::Less)
    }

    /// Order a range against a version or range string
    pub fn compare_str(&self, other: &str) -> Result<Ordering, RangeError> {
        match VersionParser::default_ref().parse(other)? {
            Some(VersionOrRange::Version(version)) => Ok(self.compare_version(&version)),
            Some(VersionOrRange::Range(range)) => Ok(self.cmp(&range)),
            None => Err(RangeError::Unparsable(other.to_string())),
        }
    }

    /// Final tie-break between ranges with identical bounds.
    ///
    /// `<` and `<=` sort behind everything else, then wildcard ranges sort
    /// behind ranges spelled out in full.
    fn tie_rank(&self) -> u8 {
        match self.operator {
            Some(Operator::LessThan | Operator::LessThanOrEqual) => 0,
            _ if self.has_wildcard() => 1,
            _ => 2,
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::new(Part::Number(0), Part::Number(0), Part::Number(0), None)
    }
}

impl Ord for Range {
    fn cmp(&self, other: &Self) -> Ordering {
        self.upper_bound_inclusive()
            .cmp(&other.upper_bound_inclusive())
            .then_with(|| self.lower_bound().cmp(&other.lower_bound()))
            .then_with(|| self.tie_rank().cmp(&other.tie_rank()))
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Range {}

impl PartialEq<Version> for Range {
    fn eq(&self, other: &Version) -> bool {
        self.compare_version(other) == Ordering::Equal
    }
}

impl PartialOrd<Version> for Range {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.compare_version(other))
    }
}

impl PartialEq<Range> for Version {
    fn eq(&self, other: &Range) -> bool {
        other == self
    }
}

impl PartialOrd<Range> for Version {
    fn partial_cmp(&self, other: &Range) -> Option<Ordering> {
        Some(other.compare_version(self).reverse())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Template::default_ref()))
    }
}
