//! Dependency rule engine.
//!
//! Relation families are ordered tables of tree patterns evaluated against every
//! freshly built binary node. Patterns see the tree through [`Navigator`], which
//! hides the temporary nodes introduced by binarization.

pub mod catalogue;
pub mod families;
pub mod matcher;
pub mod nav;

#[cfg(test)]
mod testing;

pub use catalogue::{Catalogue, Match, Pattern, RelationFamily, Rule};
pub use matcher::Matcher;
pub use nav::Navigator;
