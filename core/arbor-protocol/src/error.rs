use alloc::string::{String, ToString};
use core::fmt;

use crate::ids::NodeId;

/// A treebank spelling that is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbol {
    pub kind: &'static str,
    pub symbol: String,
}

impl UnknownSymbol {
    pub fn new(kind: &'static str, symbol: &str) -> Self {
        Self {
            kind,
            symbol: symbol.to_string(),
        }
    }
}

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} symbol '{}'", self.kind, self.symbol)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownSymbol {}

/// Structural problems found while assembling a reference tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    Empty,
    MissingNode(NodeId),
    MissingToken(usize),
    ChildAlreadyAttached { child: NodeId, parent: NodeId },
    DetachedNode(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Empty => write!(f, "reference tree has no nodes"),
            TreeError::MissingNode(id) => write!(f, "node {} does not exist yet", id),
            TreeError::MissingToken(token) => write!(f, "token {} has not been added", token),
            TreeError::ChildAlreadyAttached { child, parent } => {
                write!(f, "node {} already has parent {}", child, parent)
            }
            TreeError::DetachedNode(id) => {
                write!(f, "node {} has no parent but is not the root", id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}
