//! Semver facade providing string-level version operations

use std::cmp::Ordering;

use crate::range::RangeError;
use crate::version::Version;
use crate::version_or_range::VersionOrRange;
use crate::version_parser::VersionParser;

/// Main facade for working with version and range strings
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a constraint.
    ///
    /// The constraint may be a range or a plain version. Anything that does
    /// not parse is not satisfied. A plain version constraint (`v1.2.3`)
    /// matches by equality, but an exact range (`=v1.2.3`) has an empty
    /// half-open interval and is satisfied by nothing, see [`Range::matches`].
    ///
    /// [`Range::matches`]: crate::Range::matches
    pub fn satisfies(version: &str, constraint: &str) -> bool {
        let Some(constraint) = Self::parse_constraint(constraint) else {
            return false;
        };
        Version::parse(version).is_some_and(|v| constraint.matches(&v))
    }

    /// Return all versions that satisfy the given constraint
    pub fn satisfied_by(versions: &[&str], constraint: &str) -> Vec<String> {
        let Some(constraint) = Self::parse_constraint(constraint) else {
            return Vec::new();
        };

        versions
            .iter()
            .filter(|v| Version::parse(v).is_some_and(|v| constraint.matches(&v)))
            .map(|v| v.to_string())
            .collect()
    }

    /// Return the greatest version that satisfies the given constraint
    pub fn max_satisfying(versions: &[&str], constraint: &str) -> Option<String> {
        let constraint = Self::parse_constraint(constraint)?;

        versions
            .iter()
            .filter_map(|v| Version::parse(v).map(|parsed| (parsed, *v)))
            .filter(|(parsed, _)| constraint.matches(parsed))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.to_string())
    }

    /// Sort version and range strings in ascending order.
    ///
    /// Strings that do not parse are dropped. Ties keep their input order.
    pub fn sort(items: &[&str]) -> Vec<String> {
        Self::usort(items, true)
    }

    /// Sort version and range strings in descending order
    pub fn rsort(items: &[&str]) -> Vec<String> {
        Self::usort(items, false)
    }

    /// Compare two version or range strings
    pub fn compare(a: &str, b: &str) -> Result<Ordering, RangeError> {
        let parse = |input: &str| -> Result<VersionOrRange, RangeError> {
            VersionParser::default_ref()
                .parse(input)?
                .ok_or_else(|| RangeError::Unparsable(input.to_string()))
        };
        Ok(parse(a)?.cmp(&parse(b)?))
    }

    fn parse_constraint(constraint: &str) -> Option<VersionOrRange> {
        match VersionParser::default_ref().parse(constraint) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("Ignoring constraint \"{}\": {}", constraint, e);
                None
            }
        }
    }

    fn usort(items: &[&str], ascending: bool) -> Vec<String> {
        let parser = VersionParser::default_ref();

        let mut parsed: Vec<(VersionOrRange, usize)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| Some((parser.parse(item).ok()??, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            if ascending {
                a.cmp(b)
            } else {
                b.cmp(a)
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| items[i].to_string())
            .collect()
    }
}
