//! Operator types for version ranges

use std::fmt;
use std::str::FromStr;

use super::RangeError;

/// Comparison operators for version ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Approximately (~)
    Tilde,
    /// Pessimistic (~>)
    Pessimistic,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "=",
            Operator::Tilde => "~",
            Operator::Pessimistic => "~>",
        }
    }

    /// `~` and `~>` allow changes below the last given component
    pub fn is_approximate(&self) -> bool {
        matches!(self, Operator::Tilde | Operator::Pessimistic)
    }

    /// Get all supported operators, longest tokens first
    pub fn supported_operators() -> &'static [&'static str] {
        &["~>", "~", ">=", ">", "<=", "<", "="]
    }
}

impl FromStr for Operator {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            "=" => Ok(Operator::Equal),
            "~" => Ok(Operator::Tilde),
            "~>" => Ok(Operator::Pessimistic),
            _ => Err(RangeError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_tokens() {
        for token in Operator::supported_operators() {
            let operator: Operator = token.parse().unwrap();
            assert_eq!(operator.as_str(), *token);
        }
    }

    #[test]
    fn test_invalid_operator() {
        assert!(matches!(
            "==".parse::<Operator>(),
            Err(RangeError::InvalidOperator(op)) if op == "=="
        ));
        assert!("^".parse::<Operator>().is_err());
    }

    #[test]
    fn test_is_approximate() {
        assert!(Operator::Tilde.is_approximate());
        assert!(Operator::Pessimistic.is_approximate());
        assert!(!Operator::LessThan.is_approximate());
        assert!(!Operator::Equal.is_approximate());
    }
}
