//! Shift-reduce constituency parser state with incremental dependency derivation.
//!
//! A sentence is parsed by chaining immutable [`StateItem`]s from
//! [`StateItem::initial`]. Every binary reduction builds a node through the
//! session's rule [`Catalogue`](arbor_rules::Catalogue), which attaches the
//! dependency links that configuration licenses.

pub mod bracket;
pub mod config;
pub mod error;
pub mod graph;
pub mod loss;
pub mod oracle;
pub mod output;
pub mod scored;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

pub use bracket::{parse_tree, parse_treebank};
pub use config::ParserConfig;
pub use error::{BracketError, OracleError, OutputError, StateError};
pub use graph::DependencyGraph;
pub use loss::{LossCounts, LossState};
pub use oracle::follow_oracle;
pub use output::{OutputNode, ParsedTree};
pub use scored::ScoredStateAction;
pub use session::ParseSession;
pub use state::StateItem;
