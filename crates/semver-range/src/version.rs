//! Concrete `major.minor.patch[-special][+metadata]` versions

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::template::Template;
use crate::version_parser::VersionParser;

/// Error type for version operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Incrementing prerelease strings is unimplemented")]
    UnsupportedIncrement,
    #[error("Invalid part to increment: \"{0}\"")]
    InvalidIncrementTarget(String),
    #[error("Cannot increment {0}: value would overflow")]
    Overflow(Component),
}

/// A version component that can be targeted by an increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Component {
    Major,
    Minor,
    #[default]
    Patch,
    /// The prerelease string. Incrementing it is not supported.
    Special,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
            Component::Special => "special",
        }
    }

    /// Position of the component in (major, minor, patch)
    pub(crate) fn index(&self) -> Option<usize> {
        match self {
            Component::Major => Some(0),
            Component::Minor => Some(1),
            Component::Patch => Some(2),
            Component::Special => None,
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        match index {
            0 => Component::Major,
            1 => Component::Minor,
            _ => Component::Patch,
        }
    }
}

impl FromStr for Component {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Component::Major),
            "minor" => Ok(Component::Minor),
            "patch" => Ok(Component::Patch),
            "special" | "prerelease" => Ok(Component::Special),
            _ => Err(VersionError::InvalidIncrementTarget(s.to_string())),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete semantic version.
///
/// Ordering is field-wise over `(major, minor, patch, special, metadata)`, an
/// absent prerelease or metadata string sorting before a present one. This is
/// not semver precedence: `1.0.0-alpha` sorts after `1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    major: i64,
    minor: i64,
    patch: i64,
    special: Option<String>,
    metadata: Option<String>,
}

impl Version {
    /// Every component at the largest representable value
    pub const BIGGEST: Version = Version::from_numeric([i64::MAX; 3]);

    /// `0.0.0`
    pub const SMALLEST: Version = Version::from_numeric([0; 3]);

    /// Sorts below every real version. Only used as a bound.
    pub const IMPOSSIBLY_SMALLEST: Version = Version::from_numeric([-1; 3]);

    /// Components are taken as given. Negative values are reserved for the
    /// bound sentinels such as [`Version::IMPOSSIBLY_SMALLEST`]; parsing never
    /// produces them.
    pub fn new(major: i64, minor: i64, patch: i64) -> Self {
        Self::from_numeric([major, minor, patch])
    }

    pub(crate) const fn from_numeric(parts: [i64; 3]) -> Self {
        Version {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
            special: None,
            metadata: None,
        }
    }

    /// Set the prerelease string. An empty string clears it.
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = non_empty(special.into());
        self
    }

    /// Set the build metadata. An empty string clears it.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = non_empty(metadata.into());
        self
    }

    pub fn major(&self) -> i64 {
        self.major
    }

    pub fn minor(&self) -> i64 {
        self.minor
    }

    pub fn patch(&self) -> i64 {
        self.patch
    }

    pub fn special(&self) -> Option<&str> {
        self.special.as_deref()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.special.is_some()
    }

    pub(crate) fn numeric(&self) -> [i64; 3] {
        [self.major, self.minor, self.patch]
    }

    /// All parts of the version; prerelease and metadata are `None` when unset
    pub fn components(&self) -> (i64, i64, i64, Option<&str>, Option<&str>) {
        (
            self.major,
            self.minor,
            self.patch,
            self.special(),
            self.metadata(),
        )
    }

    /// Check whether this version is identical to another
    pub fn matches(&self, other: &Version) -> bool {
        self == other
    }

    /// Check whether this version is identical to a version string.
    ///
    /// A string that does not parse never matches.
    pub fn matches_str(&self, other: &str) -> bool {
        Version::parse(other).is_some_and(|v| self.matches(&v))
    }

    /// Return a new version with `component` bumped (patch by default).
    ///
    /// Lower components are reset to zero and the prerelease and metadata
    /// strings are dropped.
    pub fn increment(&self, component: Option<Component>) -> Result<Self, VersionError> {
        let mut next = self.clone();
        next.increment_mut(component)?;
        Ok(next)
    }

    /// In-place variant of [`Version::increment`]
    pub fn increment_mut(&mut self, component: Option<Component>) -> Result<&mut Self, VersionError> {
        let component = component.unwrap_or_default();
        let index = component.index().ok_or(VersionError::UnsupportedIncrement)?;
        let parts = bump_numeric(self.numeric(), index, component)?;

        self.major = parts[0];
        self.minor = parts[1];
        self.patch = parts[2];
        self.special = None;
        self.metadata = None;
        Ok(self)
    }

    /// Parse a version with the default template, missing parts set to zero
    pub fn parse(input: &str) -> Option<Self> {
        VersionParser::default_ref().parse_version(input)
    }

    /// Render the version through a template
    pub fn format(&self, template: &Template) -> String {
        template.render(
            &self.major,
            &self.minor,
            &self.patch,
            self.special(),
            self.metadata(),
        )
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Template::default_ref()))
    }
}

/// Bump `parts[index]` and zero every part after it
pub(crate) fn bump_numeric(
    mut parts: [i64; 3],
    index: usize,
    component: Component,
) -> Result<[i64; 3], VersionError> {
    parts[index] = parts[index]
        .checked_add(1)
        .ok_or(VersionError::Overflow(component))?;
    for part in parts.iter_mut().skip(index + 1) {
        *part = 0;
    }
    Ok(parts)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
