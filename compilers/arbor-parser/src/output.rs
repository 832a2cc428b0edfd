use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_protocol::{Action, CfgTree, CfgTreeNode, Constituent, NodeFlags, NodeId, TaggedWord, TreeError};
use arbor_tree::{Link, NodeKind, Span, SyntaxNode};

use crate::error::OutputError;
use crate::graph::DependencyGraph;
use crate::state::StateItem;

/// One node of a finished derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct OutputNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Category including the temporary bit.
    pub constituent: Constituent,
    pub left_child: Option<NodeId>,
    pub right_child: Option<NodeId>,
    pub head: usize,
    pub span: Span,
    pub links: Vec<Link>,
}

impl OutputNode {
    fn from_node(node: &SyntaxNode) -> Self {
        Self {
            id: node.id(),
            kind: node.kind(),
            constituent: node.constituent(),
            left_child: node.left_child().map(SyntaxNode::id),
            right_child: node.right_child().map(SyntaxNode::id),
            head: node.head(),
            span: node.span(),
            links: node.links().to_vec(),
        }
    }

    fn to_cfg_node(&self) -> CfgTreeNode {
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::CONSTITUENT, self.kind != NodeKind::Leaf);
        flags.set(NodeFlags::SINGLE_CHILD, self.kind == NodeKind::SingleChild);
        flags.set(NodeFlags::HEAD_LEFT, self.kind == NodeKind::HeadLeft);
        flags.set(NodeFlags::TEMPORARY, self.constituent.is_temporary());
        CfgTreeNode {
            constituent: self.constituent.extract(),
            flags,
            left_child: self.left_child,
            right_child: self.right_child,
            token: self.head,
        }
    }
}

/// The flattened result of a terminated derivation, nodes in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ParsedTree {
    pub words: Vec<TaggedWord>,
    pub nodes: Vec<OutputNode>,
    pub root: NodeId,
}

impl ParsedTree {
    /// Every dependency link, in the order the nodes were built.
    pub fn dependencies(&self) -> impl Iterator<Item = &Link> + '_ {
        self.nodes.iter().flat_map(|node| node.links.iter())
    }

    pub fn root_node(&self) -> Option<&OutputNode> {
        self.nodes.get(self.root.index())
    }

    /// Converts back into the reference-tree format the oracle consumes.
    pub fn to_cfg_tree(&self) -> Result<CfgTree, TreeError> {
        let mut tree = CfgTree::new();
        for word in &self.words {
            tree.push_word(word.clone());
        }
        for node in &self.nodes {
            tree.push_node(node.to_cfg_node())?;
        }
        Ok(tree)
    }

    pub fn dependency_graph(&self) -> DependencyGraph {
        DependencyGraph::from_links(self.words.len(), self.dependencies())
    }
}

impl StateItem {
    /// Collects the nodes of a terminated derivation.
    ///
    /// With fragments allowed, a stack holding several trees is first joined
    /// under `NONE` nodes; otherwise it is reported as incomplete.
    pub fn generate_tree(self: &Arc<Self>) -> Result<ParsedTree, OutputError> {
        if !self.is_terminated() {
            return Err(OutputError::NotTerminated);
        }

        let stack = self.stack_size();
        if stack > 1 {
            if !self.session().config().allow_fragments {
                log::warn!("parser failed: {} fragments left on the stack", stack);
                return Err(OutputError::Incomplete { stack });
            }
            return self.join_fragments()?.generate_tree();
        }

        let mut nodes: Vec<&SyntaxNode> = self
            .chain()
            .filter(|state| !state.is_terminated())
            .filter_map(|state| state.node().map(|node| node.as_ref()))
            .collect();
        nodes.reverse();

        let root = match nodes.last() {
            Some(node) => node.id(),
            None => return Err(OutputError::Incomplete { stack }),
        };
        for (index, node) in nodes.iter().enumerate() {
            let expected = NodeId::from_index(index);
            if node.id() != expected {
                return Err(OutputError::NonContiguous {
                    expected,
                    found: node.id(),
                });
            }
        }

        Ok(ParsedTree {
            words: self.session().words().as_slice().to_vec(),
            nodes: nodes.into_iter().map(OutputNode::from_node).collect(),
            root,
        })
    }

    /// Replays the derivation from before termination, joining stack fragments right-headed.
    fn join_fragments(self: &Arc<Self>) -> Result<Arc<StateItem>, OutputError> {
        let mut item = Arc::clone(self);
        while item.is_terminated() {
            item = match item.previous_action() {
                Some(previous) => Arc::clone(previous),
                None => return Err(OutputError::NotTerminated),
            };
        }

        let join = Action::ReduceBinary {
            constituent: Constituent::NONE,
            head_left: false,
            temporary: false,
        };
        while item.stack_size() > 1 {
            item = item.apply(join)?;
        }
        Ok(item.terminate()?)
    }
}
