//! Range components

use std::fmt;
use std::str::FromStr;

use super::RangeError;

/// Canonical wildcard token
pub const WILDCARD: char = 'x';

/// Every accepted wildcard token. The first one is canonical.
pub const WILDCARD_CHARS: [char; 2] = ['x', '*'];

/// One of the major, minor or patch slots of a range.
///
/// Numbers share the domain of [`Version`](crate::Version) components and are
/// never negative when built through [`FromStr`] or [`TryFrom<i64>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Number(i64),
    Wildcard,
}

impl Part {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Part::Wildcard)
    }

    pub fn number(&self) -> Option<i64> {
        match self {
            Part::Number(n) => Some(*n),
            Part::Wildcard => None,
        }
    }

    /// The value used when a wildcard is read as a plain version
    pub(crate) fn zero_filled(&self) -> i64 {
        self.number().unwrap_or(0)
    }

    pub fn is_wildcard_token(token: &str) -> bool {
        let mut chars = token.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if WILDCARD_CHARS.contains(&c))
    }
}

impl From<u32> for Part {
    fn from(n: u32) -> Self {
        Part::Number(i64::from(n))
    }
}

impl TryFrom<i64> for Part {
    type Error = RangeError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if n < 0 {
            return Err(RangeError::InvalidPart(n.to_string()));
        }
        Ok(Part::Number(n))
    }
}

impl FromStr for Part {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Part::is_wildcard_token(s) {
            return Ok(Part::Wildcard);
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RangeError::InvalidPart(s.to_string()));
        }
        s.parse::<i64>()
            .map(Part::Number)
            .map_err(|_| RangeError::InvalidPart(s.to_string()))
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Number(n) => write!(f, "{}", n),
            Part::Wildcard => write!(f, "{}", WILDCARD),
        }
    }
}
