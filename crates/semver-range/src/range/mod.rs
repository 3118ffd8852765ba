//! Version ranges: operators, wildcard parts and bound computation

mod bound;
mod operator;
mod part;
#[allow(clippy::module_inception)]
mod range;

pub use operator::Operator;
pub use part::{Part, WILDCARD, WILDCARD_CHARS};
pub use range::{Range, RangeError};
