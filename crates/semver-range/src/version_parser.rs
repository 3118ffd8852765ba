//! Parsing of version and range strings

use lazy_static::lazy_static;
use regex::Regex;

use crate::range::{Operator, Part, Range, RangeError};
use crate::template::{Template, TemplateError};
use crate::version::Version;
use crate::version_or_range::VersionOrRange;

lazy_static! {
    // Leading comparison operator, longest token first
    static ref OPERATOR_RE: Regex = Regex::new(&format!(
        r"^\s*(?P<operator>{})\s*(?P<rest>.+)$",
        Operator::supported_operators()
            .iter()
            .map(|op| regex::escape(op))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .unwrap();

    static ref DEFAULT_PARSER: VersionParser = VersionParser::new();
}

/// Parser for versions and ranges driven by a [`Template`]
#[derive(Debug, Clone)]
pub struct VersionParser {
    template: Template,
    allow_missing: bool,
}

impl VersionParser {
    /// Create a parser with the default template that fills missing parts
    pub fn new() -> Self {
        VersionParser {
            template: Template::default(),
            allow_missing: true,
        }
    }

    /// The shared default parser
    pub fn default_ref() -> &'static VersionParser {
        &DEFAULT_PARSER
    }

    /// Create a parser from a template string
    pub fn with_format(format: &str) -> Result<Self, TemplateError> {
        Ok(Self::new().with_template(Template::new(format)?))
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// When false, inputs missing the major, minor or patch part do not parse
    pub fn allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Check whether a string should be read as a range
    pub fn is_range_format(&self, input: &str) -> bool {
        Self::starts_with_operator(input).is_some() || self.has_wildcard_format(input)
    }

    /// The comparison operator the string starts with, if any
    pub fn starts_with_operator(input: &str) -> Option<Operator> {
        OPERATOR_RE
            .captures(input)
            .and_then(|caps| caps.name("operator"))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Check whether the major, minor or patch position holds a wildcard
    pub fn has_wildcard_format(&self, input: &str) -> bool {
        self.template.find_range(input).is_some_and(|parts| {
            parts
                .numeric()
                .iter()
                .flatten()
                .any(|token| Part::is_wildcard_token(token))
        })
    }

    /// Parse a string as a range if it looks like one, as a version otherwise.
    ///
    /// Returns `Ok(None)` when the input does not match the template.
    pub fn parse(&self, input: &str) -> Result<Option<VersionOrRange>, RangeError> {
        if self.is_range_format(input) {
            log::trace!("Parsing \"{}\" as a range", input);
            Ok(self.parse_range(input)?.map(VersionOrRange::Range))
        } else {
            log::trace!("Parsing \"{}\" as a version", input);
            Ok(self.parse_version(input).map(VersionOrRange::Version))
        }
    }

    /// Parse a plain version
    pub fn parse_version(&self, input: &str) -> Option<Version> {
        let parts = self.template.match_version(input.trim())?;

        let mut numeric = [0i64; 3];
        for (slot, raw) in numeric.iter_mut().zip(parts.numeric()) {
            match raw {
                Some(digits) => *slot = digits.parse().ok()?,
                None if self.allow_missing => {}
                None => return None,
            }
        }

        let mut version = Version::new(numeric[0], numeric[1], numeric[2]);
        if let Some(special) = parts.special {
            version = version.with_special(special);
        }
        if let Some(metadata) = parts.metadata {
            version = version.with_metadata(metadata);
        }
        Some(version)
    }

    /// Parse a range, whether or not it looks like one.
    ///
    /// Missing parts default to zero, or to a wildcard after `~` and `~>`, so
    /// `~> 1.2` reads as `~> 1.2.x` while `1.2` reads as `1.2.0`. Parts missing
    /// after a wildcard are always wildcards: `1.x` reads as `1.x.x`.
    pub fn parse_range(&self, input: &str) -> Result<Option<Range>, RangeError> {
        let input = input.trim();

        let (operator, rest) = match OPERATOR_RE.captures(input) {
            Some(caps) => {
                let operator = caps
                    .name("operator")
                    .map(|m| m.as_str().parse::<Operator>())
                    .transpose()?;
                let rest = caps.name("rest").map_or("", |m| m.as_str());
                (operator, rest.trim())
            }
            None => (None, input),
        };

        let Some(parts) = self.template.match_range(rest) else {
            log::trace!("\"{}\" does not match template \"{}\"", rest, self.template);
            return Ok(None);
        };

        if parts.special.is_some() || parts.metadata.is_some() {
            log::debug!("Rejecting range \"{}\" with prerelease or metadata", input);
            return Err(RangeError::PrereleaseOrMetadata(input.to_string()));
        }

        if !self.allow_missing && parts.numeric().iter().any(Option::is_none) {
            return Ok(None);
        }

        let mut default = if operator.is_some_and(|op| op.is_approximate()) {
            Part::Wildcard
        } else {
            Part::Number(0)
        };

        let mut slots = [default; 3];
        for (slot, raw) in slots.iter_mut().zip(parts.numeric()) {
            match raw {
                Some(token) => {
                    *slot = token.parse()?;
                    // wildcards stay a contiguous suffix
                    if slot.is_wildcard() {
                        default = Part::Wildcard;
                    }
                }
                None => *slot = default,
            }
        }

        let [major, minor, patch] = slots;
        Ok(Some(Range::new(major, minor, patch, operator)))
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}
