use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::penn::Constituent;

/// The transition vocabulary exchanged with the search driver.
///
/// Constituents carried by reductions are base categories; a binary reduction
/// marks synthetic binarization nodes through `temporary` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub enum Action {
    /// Push the next token. The constituent is a hint stored on the new leaf.
    Shift(Constituent),
    ReduceUnary(Constituent),
    ReduceBinary {
        constituent: Constituent,
        head_left: bool,
        temporary: bool,
    },
    /// Finish the derivation (POP_ROOT).
    ReduceRoot,
    /// Pass-through step for states that terminated early in the beam.
    Idle,
}

impl Action {
    pub fn is_shift(&self) -> bool {
        matches!(self, Action::Shift(_))
    }

    pub fn is_reduce_unary(&self) -> bool {
        matches!(self, Action::ReduceUnary(_))
    }

    pub fn is_reduce_binary(&self) -> bool {
        matches!(self, Action::ReduceBinary { .. })
    }

    pub fn is_reduce_root(&self) -> bool {
        matches!(self, Action::ReduceRoot)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Action::Idle)
    }

    /// The constituent the action produces, with the temporary bit applied.
    pub fn constituent(&self) -> Option<Constituent> {
        match *self {
            Action::Shift(c) | Action::ReduceUnary(c) => Some(c),
            Action::ReduceBinary {
                constituent,
                temporary,
                ..
            } => Some(constituent.with_temporary(temporary)),
            Action::ReduceRoot | Action::Idle => None,
        }
    }

    /// Change in stack depth caused by the action.
    pub fn stack_delta(&self) -> isize {
        match self {
            Action::Shift(_) => 1,
            Action::ReduceBinary { .. } => -1,
            Action::ReduceUnary(_) | Action::ReduceRoot | Action::Idle => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Shift(hint) if hint.is_none() => write!(f, "SHIFT"),
            Action::Shift(hint) => write!(f, "SHIFT {}", hint),
            Action::ReduceUnary(c) => write!(f, "REDUCE_UNARY {}", c),
            Action::ReduceBinary {
                constituent,
                head_left,
                temporary,
            } => write!(
                f,
                "REDUCE_BINARY_{} {}",
                if head_left { "L" } else { "R" },
                constituent.with_temporary(temporary)
            ),
            Action::ReduceRoot => write!(f, "REDUCE_ROOT"),
            Action::Idle => write!(f, "IDLE"),
        }
    }
}
