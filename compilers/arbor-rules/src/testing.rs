use std::sync::Arc;

use arbor_protocol::{Constituent, NodeId, Phrase, Tag};
use arbor_tree::{LexicalContext, NoLinks, NodeRef, SyntaxNode};

/// Builds small binarized trees bottom-up for rule tests.
pub struct TreeBuilder {
    words: LexicalContext,
    nodes: Vec<NodeRef>,
}

impl TreeBuilder {
    pub fn new(pairs: &[(&str, Tag)]) -> Self {
        Self {
            words: LexicalContext::from_pairs(pairs.iter().copied()),
            nodes: Vec::new(),
        }
    }

    pub fn words(&self) -> &LexicalContext {
        &self.words
    }

    pub fn root(&self) -> &SyntaxNode {
        self.nodes.last().expect("tree has no nodes")
    }

    fn next_id(&self) -> NodeId {
        NodeId::from_index(self.nodes.len())
    }

    fn keep(&mut self, node: SyntaxNode) -> NodeRef {
        let node = Arc::new(node);
        self.nodes.push(Arc::clone(&node));
        node
    }

    pub fn leaf(&mut self, token: usize) -> NodeRef {
        let node = SyntaxNode::leaf(self.next_id(), Constituent::NONE, token);
        self.keep(node)
    }

    pub fn unary(&mut self, phrase: Phrase, child: NodeRef) -> NodeRef {
        let node = SyntaxNode::unary(self.next_id(), phrase.into(), child);
        self.keep(node)
    }

    pub fn binary(&mut self, phrase: Phrase, left: NodeRef, right: NodeRef, head_left: bool, temporary: bool) -> NodeRef {
        let node = SyntaxNode::binary(
            self.next_id(),
            phrase.into(),
            left,
            right,
            head_left,
            temporary,
            &NoLinks,
            &self.words,
        );
        self.keep(node)
    }
}
