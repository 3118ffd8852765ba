//! Semantic version parsing, ordering and range matching
//!
//! Versions have the form `major.minor.patch[-special][+metadata]` and are read
//! and written through a configurable [`Template`]. Ranges add a comparison
//! operator (`>`, `>=`, `<`, `<=`, `=`, `~`, `~>`) and `x`/`*` wildcards, and
//! can be tested against versions or ordered alongside them.
//!
//! ```
//! use semver_range::{Semver, Version, VersionOrRange};
//!
//! assert!(Semver::satisfies("v1.4.2", "~> v1.2"));
//!
//! let range = VersionOrRange::parse("v1.2.x").unwrap().unwrap();
//! assert!(range.matches(&Version::new(1, 2, 7)));
//! ```

pub mod range;
mod semver;
mod template;
mod version;
mod version_or_range;
mod version_parser;

pub use range::{Operator, Part, Range, RangeError};
pub use semver::Semver;
pub use template::{Template, TemplateError, DEFAULT_FORMAT, PLAIN_FORMAT};
pub use version::{Component, Version, VersionError};
pub use version_or_range::VersionOrRange;
pub use version_parser::VersionParser;
