//! Bounds of a range.
//!
//! Every range reduces to the half-open interval
//! `[lower_bound, upper_bound)` over plain versions. The inclusive upper
//! bound is only used to order ranges.

use super::{Operator, Range};
use crate::version::Version;

/// Range parts as numbers, `None` for a wildcard
type Slots = [Option<i64>; 3];

fn slots(range: &Range) -> Slots {
    range.parts().map(|p| p.number())
}

fn zero_fill(slots: Slots) -> Version {
    Version::from_numeric(slots.map(|s| s.unwrap_or(0)))
}

/// Bump the last numeric slot, zeroing numeric slots after it
fn bump(mut slots: Slots) -> Slots {
    if let Some(index) = slots.iter().rposition(Option::is_some) {
        for (i, slot) in slots.iter_mut().enumerate().skip(index) {
            if let Some(value) = slot {
                *value = if i == index { value.saturating_add(1) } else { 0 };
            }
        }
    }
    slots
}

/// Turn the last numeric slot into a wildcard (`1.2.x` -> `1.x.x`).
/// The major slot is never widened.
fn widen(mut slots: Slots) -> Slots {
    if let Some(index) = slots.iter().rposition(Option::is_some) {
        if index > 0 {
            slots[index] = None;
        }
    }
    slots
}

impl Range {
    /// The smallest version inside the range
    pub fn lower_bound(&self) -> Version {
        if self.accepts_any_version() {
            return Version::SMALLEST;
        }

        match self.operator() {
            Some(Operator::LessThan) if self.zero_filled() == Version::SMALLEST => {
                Version::IMPOSSIBLY_SMALLEST
            }
            Some(Operator::LessThan | Operator::LessThanOrEqual) => Version::SMALLEST,
            // `> 1.2.3` starts at `1.2.4`, `> 1.2.x` at `1.3.0`
            Some(Operator::GreaterThan) => zero_fill(bump(slots(self))),
            Some(
                Operator::GreaterThanOrEqual
                | Operator::Equal
                | Operator::Tilde
                | Operator::Pessimistic,
            )
            | None => self.zero_filled(),
        }
    }

    /// Same as [`Range::lower_bound`]; the lower edge is always inclusive
    pub fn lower_bound_inclusive(&self) -> Version {
        self.lower_bound()
    }

    /// The first version above the range
    pub fn upper_bound(&self) -> Version {
        if self.accepts_any_version() {
            return Version::BIGGEST;
        }

        match self.operator() {
            Some(Operator::GreaterThan | Operator::GreaterThanOrEqual) => Version::BIGGEST,
            // `~> 1.2` and `~> 1.2.x` stop at `2.0.0`, `~> 1.2.3` at `1.3.0`
            Some(op) if op.is_approximate() => zero_fill(bump(widen(slots(self)))),
            // `<= 1.2.3` stops at `1.2.4`, `1.2.x` at `1.3.0`
            Some(Operator::LessThanOrEqual) => zero_fill(bump(slots(self))),
            _ if self.has_wildcard() => zero_fill(bump(slots(self))),
            _ => self.zero_filled(),
        }
    }

    /// The largest version still inside the range
    pub fn upper_bound_inclusive(&self) -> Version {
        let upper = self.upper_bound();
        let mut parts = upper.numeric();

        if parts == [0, 0, 0] {
            return Version::IMPOSSIBLY_SMALLEST;
        }
        if upper == self.lower_bound() || upper == Version::BIGGEST {
            return upper;
        }

        // `1.3.0` -> `1.2.<max>`
        if let Some(index) = parts.iter().rposition(|&p| p != 0) {
            parts[index] -= 1;
            for part in parts.iter_mut().skip(index + 1) {
                *part = i64::MAX;
            }
        }
        Version::from_numeric(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Part;

    const I: i64 = i64::MAX;

    fn r(major: &str, minor: &str, patch: &str, operator: Option<&str>) -> Range {
        Range::from_tokens(major, minor, patch, operator).unwrap()
    }

    fn v(major: i64, minor: i64, patch: i64) -> Version {
        Version::new(major, minor, patch)
    }

    fn table() -> Vec<Range> {
        vec![
            r("1", "1", "0", Some(">")),
            r("1", "1", "0", Some(">=")),
            r("1", "0", "1", Some(">")),
            r("1", "0", "0", Some(">")),
            r("1", "1", "x", Some("~>")),
            r("1", "x", "x", None),
            r("1", "1", "0", Some("~>")),
            r("1", "1", "0", None),
            r("1", "1", "0", Some("<=")),
            r("1", "0", "1", Some("~>")),
            r("1", "0", "0", Some("~>")),
            r("1", "0", "x", None),
            r("1", "1", "0", Some("<")),
            r("1", "0", "0", None),
            r("1", "0", "0", Some("<=")),
            r("0", "1", "2", Some("~>")),
            r("0", "1", "1", Some("~>")),
            r("1", "0", "0", Some("<")),
            r("0", "9", "9", None),
            r("0", "0", "0", Some("~>")),
            r("0", "0", "1", None),
            r("0", "0", "0", Some("<=")),
            r("0", "0", "0", Some("<")),
        ]
    }

    #[test]
    fn test_upper_bound() {
        let expected = vec![
            Version::BIGGEST,
            Version::BIGGEST,
            Version::BIGGEST,
            Version::BIGGEST,
            v(2, 0, 0),
            v(2, 0, 0),
            v(1, 2, 0),
            v(1, 1, 0),
            v(1, 1, 1),
            v(1, 1, 0),
            v(1, 1, 0),
            v(1, 1, 0),
            v(1, 1, 0),
            v(1, 0, 0),
            v(1, 0, 1),
            v(0, 2, 0),
            v(0, 2, 0),
            v(1, 0, 0),
            v(0, 9, 9),
            v(0, 1, 0),
            v(0, 0, 1),
            v(0, 0, 1),
            v(0, 0, 0),
        ];

        for (range, expected) in table().iter().zip(expected) {
            assert_eq!(range.upper_bound(), expected, "upper bound of {}", range);
        }
    }

    #[test]
    fn test_upper_bound_inclusive() {
        let expected = vec![
            Version::BIGGEST,
            Version::BIGGEST,
            Version::BIGGEST,
            Version::BIGGEST,
            v(1, I, I),
            v(1, I, I),
            v(1, 1, I),
            v(1, 1, 0),
            v(1, 1, 0),
            v(1, 0, I),
            v(1, 0, I),
            v(1, 0, I),
            v(1, 0, I),
            v(1, 0, 0),
            v(1, 0, 0),
            v(0, 1, I),
            v(0, 1, I),
            v(0, I, I),
            v(0, 9, 9),
            v(0, 0, I),
            v(0, 0, 1),
            v(0, 0, 0),
            Version::IMPOSSIBLY_SMALLEST,
        ];

        for (range, expected) in table().iter().zip(expected) {
            assert_eq!(range.upper_bound_inclusive(), expected, "inclusive upper bound of {}", range);
        }
    }

    #[test]
    fn test_lower_bound() {
        let expected = vec![
            v(1, 1, 1),
            v(1, 1, 0),
            v(1, 0, 2),
            v(1, 0, 1),
            v(1, 1, 0),
            v(1, 0, 0),
            v(1, 1, 0),
            v(1, 1, 0),
            Version::SMALLEST,
            v(1, 0, 1),
            v(1, 0, 0),
            v(1, 0, 0),
            Version::SMALLEST,
            v(1, 0, 0),
            Version::SMALLEST,
            v(0, 1, 2),
            v(0, 1, 1),
            Version::SMALLEST,
            v(0, 9, 9),
            v(0, 0, 0),
            v(0, 0, 1),
            v(0, 0, 0),
            Version::IMPOSSIBLY_SMALLEST,
        ];

        for (range, expected) in table().iter().zip(expected) {
            assert_eq!(range.lower_bound(), expected, "lower bound of {}", range);
            assert_eq!(range.lower_bound_inclusive(), range.lower_bound());
        }
    }

    #[test]
    fn test_greater_than_wildcard() {
        assert_eq!(r("1", "2", "x", Some(">")).lower_bound(), v(1, 3, 0));
    }

    #[test]
    fn test_approximate_major_only() {
        let range = r("1", "x", "x", Some("~>"));
        assert_eq!(range.lower_bound(), v(1, 0, 0));
        assert_eq!(range.upper_bound(), v(2, 0, 0));
    }

    #[test]
    fn test_any_version_is_unbounded() {
        let any = Range::new(Part::Wildcard, Part::Wildcard, Part::Wildcard, None);
        assert_eq!(any.lower_bound(), Version::SMALLEST);
        assert_eq!(any.upper_bound(), Version::BIGGEST);
        assert_eq!(any.upper_bound_inclusive(), Version::BIGGEST);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(bump([Some(1), Some(2), None]), [Some(1), Some(3), None]);
        assert_eq!(bump([Some(1), Some(2), Some(3)]), [Some(1), Some(2), Some(4)]);
        assert_eq!(bump([None, None, None]), [None, None, None]);
        assert_eq!(widen([Some(1), Some(2), None]), [Some(1), None, None]);
        assert_eq!(widen([Some(1), None, None]), [Some(1), None, None]);
    }
}
