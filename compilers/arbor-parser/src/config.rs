#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-session switches for the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(default))]
pub struct ParserConfig {
    /// Normalise candidate scores by the number of actions taken.
    pub scale_scores: bool,
    /// Accept derivations that end with several stack fragments; they are joined under `NONE`.
    pub allow_fragments: bool,
    /// Longest run of consecutive unary reductions `is_legal` allows.
    pub max_unary_reduces: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            scale_scores: false,
            allow_fragments: false,
            max_unary_reduces: 3,
        }
    }
}
