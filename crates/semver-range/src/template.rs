//! Template mini-language used to parse and format versions
//!
//! A template is plain text with placeholders:
//!
//! | placeholder | meaning |
//! |---|---|
//! | `%M` | major |
//! | `%m` | minor |
//! | `%p` | patch |
//! | `%s` | optional prerelease, rendered as `-special` |
//! | `%d` | optional build metadata, rendered as `+metadata` |
//!
//! The text directly in front of `%m` and `%p` is optional together with the
//! placeholder, so `v%M.%m.%p` also matches `v1.2` and `v1`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default template, e.g. `v1.2.3-alpha+build.1`
pub const DEFAULT_FORMAT: &str = "v%M.%m.%p%s%d";

/// Same as [`DEFAULT_FORMAT`] without the leading `v`
pub const PLAIN_FORMAT: &str = "%M.%m.%p%s%d";

const SPECIAL_PATTERN: &str = r"(?:-(?P<special>[A-Za-z][0-9A-Za-z.]*))?";
const METADATA_PATTERN: &str = r"(?:\+(?P<metadata>[0-9A-Za-z][0-9A-Za-z.]*))?";

lazy_static! {
    static ref DEFAULT_TEMPLATE: Template = Template::new(DEFAULT_FORMAT).unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid template \"{template}\": {reason}")]
    Invalid { template: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Major,
    Minor,
    Patch,
    Special,
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Version,
    Range,
}

/// The raw pieces of a template match
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParts<'a> {
    pub major: Option<&'a str>,
    pub minor: Option<&'a str>,
    pub patch: Option<&'a str>,
    pub special: Option<&'a str>,
    pub metadata: Option<&'a str>,
}

impl<'a> RawParts<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        let get = |name| caps.name(name).map(|m| m.as_str());
        RawParts {
            major: get("major"),
            minor: get("minor"),
            patch: get("patch"),
            special: get("special"),
            metadata: get("metadata"),
        }
    }

    pub fn numeric(&self) -> [Option<&'a str>; 3] {
        [self.major, self.minor, self.patch]
    }
}

/// A compiled template string
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    tokens: Vec<Token>,
    version_re: Regex,
    range_re: Regex,
    range_shape_re: Regex,
}

impl Template {
    /// Compile a template string
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let tokens = tokenize(&source);

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| TemplateError::Invalid {
                template: source.clone(),
                reason: e.to_string(),
            })
        };

        let version_pattern = build_pattern(&tokens, Mode::Version);
        let range_pattern = build_pattern(&tokens, Mode::Range);

        Ok(Template {
            version_re: compile(format!("^{}$", version_pattern))?,
            range_re: compile(format!("^{}$", range_pattern))?,
            range_shape_re: compile(range_pattern)?,
            tokens,
            source,
        })
    }

    /// The shared default template
    pub fn default_ref() -> &'static Template {
        &DEFAULT_TEMPLATE
    }

    /// The template string this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a whole version string
    pub(crate) fn match_version<'a>(&self, input: &'a str) -> Option<RawParts<'a>> {
        self.version_re
            .captures(input)
            .map(|caps| RawParts::from_captures(&caps))
    }

    /// Match a whole range string (without operator), allowing wildcards
    pub(crate) fn match_range<'a>(&self, input: &'a str) -> Option<RawParts<'a>> {
        self.range_re
            .captures(input)
            .map(|caps| RawParts::from_captures(&caps))
    }

    /// Find the first range-like substring of `input`
    pub(crate) fn find_range<'a>(&self, input: &'a str) -> Option<RawParts<'a>> {
        self.range_shape_re
            .captures(input)
            .map(|caps| RawParts::from_captures(&caps))
    }

    /// Fill the placeholders of the template
    pub fn render(
        &self,
        major: &dyn fmt::Display,
        minor: &dyn fmt::Display,
        patch: &dyn fmt::Display,
        special: Option<&str>,
        metadata: Option<&str>,
    ) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Major => out.push_str(&major.to_string()),
                Token::Minor => out.push_str(&minor.to_string()),
                Token::Patch => out.push_str(&patch.to_string()),
                Token::Special => {
                    if let Some(special) = special {
                        out.push('-');
                        out.push_str(special);
                    }
                }
                Token::Metadata => {
                    if let Some(metadata) = metadata {
                        out.push('+');
                        out.push_str(metadata);
                    }
                }
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        DEFAULT_TEMPLATE.clone()
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::new(s)
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Template {}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        let placeholder = if c == '%' {
            match chars.peek() {
                Some('M') => Some(Token::Major),
                Some('m') => Some(Token::Minor),
                Some('p') => Some(Token::Patch),
                Some('s') => Some(Token::Special),
                Some('d') => Some(Token::Metadata),
                _ => None,
            }
        } else {
            None
        };

        match placeholder {
            Some(token) => {
                chars.next();
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(token);
            }
            None => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn number_group(name: &str, mode: Mode) -> String {
    match mode {
        Mode::Version => format!(r"(?P<{}>[0-9]+)", name),
        Mode::Range => format!(r"(?P<{}>[0-9]+|[x*])", name),
    }
}

fn build_pattern(tokens: &[Token], mode: Mode) -> String {
    let mut pattern = String::new();
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::Literal(text) => match tokens.get(i + 1) {
                // A separator in front of minor/patch is optional along with it
                Some(next @ (Token::Minor | Token::Patch)) => {
                    let name = if *next == Token::Minor { "minor" } else { "patch" };
                    pattern.push_str(&format!(
                        "(?:{}{})?",
                        regex::escape(text),
                        number_group(name, mode)
                    ));
                    i += 1;
                }
                _ => pattern.push_str(&regex::escape(text)),
            },
            Token::Major => pattern.push_str(&number_group("major", mode)),
            Token::Minor => pattern.push_str(&format!("(?:{})?", number_group("minor", mode))),
            Token::Patch => pattern.push_str(&format!("(?:{})?", number_group("patch", mode))),
            Token::Special => pattern.push_str(SPECIAL_PATTERN),
            Token::Metadata => pattern.push_str(METADATA_PATTERN),
        }
        i += 1;
    }

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("v%M.%m.%p%s%d"),
            vec![
                Token::Literal("v".to_string()),
                Token::Major,
                Token::Literal(".".to_string()),
                Token::Minor,
                Token::Literal(".".to_string()),
                Token::Patch,
                Token::Special,
                Token::Metadata,
            ]
        );
        assert_eq!(
            tokenize("100%"),
            vec![Token::Literal("100%".to_string())]
        );
    }

    #[test]
    fn test_match_version() {
        let template = Template::default();
        let parts = template.match_version("v1.2.3-alpha.1+build.5").unwrap();
        assert_eq!(parts.numeric(), [Some("1"), Some("2"), Some("3")]);
        assert_eq!(parts.special, Some("alpha.1"));
        assert_eq!(parts.metadata, Some("build.5"));

        let parts = template.match_version("v1.2").unwrap();
        assert_eq!(parts.numeric(), [Some("1"), Some("2"), None]);

        assert!(template.match_version("1.2.3").is_none());
        assert!(template.match_version("v1.2.x").is_none());
        assert!(template.match_version("v1.2.3 trailing").is_none());
    }

    #[test]
    fn test_match_range() {
        let template = Template::new(PLAIN_FORMAT).unwrap();
        let parts = template.match_range("1.*.x").unwrap();
        assert_eq!(parts.numeric(), [Some("1"), Some("*"), Some("x")]);

        let parts = template.find_range("requires 1.2.x or so").unwrap();
        assert_eq!(parts.numeric(), [Some("1"), Some("2"), Some("x")]);
    }

    #[test]
    fn test_special_must_start_with_letter() {
        let template = Template::new(PLAIN_FORMAT).unwrap();
        assert!(template.match_version("1.2.3-1alpha").is_none());
        assert!(template.match_version("1.2.3-a").is_some());
    }

    #[test]
    fn test_render() {
        let template = Template::default();
        assert_eq!(template.render(&1, &2, &3, None, None), "v1.2.3");
        assert_eq!(
            template.render(&1, &2, &"x", Some("beta"), Some("exp.sha.5114f85")),
            "v1.2.x-beta+exp.sha.5114f85"
        );

        let custom = Template::new("release-%M_%m").unwrap();
        assert_eq!(custom.render(&4, &5, &6, None, None), "release-4_5");
    }

    #[test]
    fn test_duplicate_placeholder_is_invalid() {
        let err = Template::new("%M.%M").unwrap_err();
        assert!(err.to_string().starts_with("Invalid template \"%M.%M\""));
    }
}
