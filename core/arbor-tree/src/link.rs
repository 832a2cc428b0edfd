use arbor_protocol::DependencyLabel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lexical::LexicalContext;
use crate::node::SyntaxNode;

/// A typed grammatical relation between two token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Link {
    pub label: DependencyLabel,
    pub head: usize,
    pub dependent: usize,
}

impl Link {
    pub fn new(label: DependencyLabel, head: usize, dependent: usize) -> Self {
        Self { label, head, dependent }
    }

    pub fn is_self_loop(&self) -> bool {
        self.head == self.dependent
    }
}

/// Derives dependency links for a freshly built binary node.
///
/// Implementations only read the node and the sentence; the node is not yet
/// visible to any parser state while this runs.
pub trait LinkDeriver: Send + Sync {
    fn derive_links(&self, node: &SyntaxNode, words: &LexicalContext) -> Vec<Link>;
}

/// A deriver that never produces links.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkDeriver for NoLinks {
    fn derive_links(&self, _node: &SyntaxNode, _words: &LexicalContext) -> Vec<Link> {
        Vec::new()
    }
}
