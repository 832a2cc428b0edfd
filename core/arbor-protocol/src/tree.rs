use alloc::vec::Vec;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::TreeError;
use crate::ids::NodeId;
use crate::penn::{Constituent, TaggedWord};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct NodeFlags: u8 {
        const CONSTITUENT = 1;
        const TEMPORARY = 2;
        const SINGLE_CHILD = 4;
        const HEAD_LEFT = 8;
    }
}

/// One node of a binarized reference tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct CfgTreeNode {
    /// Category without the temporary bit; see `NodeFlags::TEMPORARY`.
    pub constituent: Constituent,
    pub flags: NodeFlags,
    pub left_child: Option<NodeId>,
    pub right_child: Option<NodeId>,
    /// Lexical head token.
    pub token: usize,
}

impl CfgTreeNode {
    pub fn leaf(token: usize) -> Self {
        Self {
            constituent: Constituent::NONE,
            flags: NodeFlags::empty(),
            left_child: None,
            right_child: None,
            token,
        }
    }

    pub fn is_constituent(&self) -> bool {
        self.flags.contains(NodeFlags::CONSTITUENT)
    }

    pub fn is_temporary(&self) -> bool {
        self.flags.contains(NodeFlags::TEMPORARY)
    }

    pub fn single_child(&self) -> bool {
        self.flags.contains(NodeFlags::SINGLE_CHILD)
    }

    pub fn head_left(&self) -> bool {
        self.flags.contains(NodeFlags::HEAD_LEFT)
    }

    /// The category as the state machine encodes it (temporary bit applied).
    pub fn full_constituent(&self) -> Constituent {
        self.constituent.with_temporary(self.is_temporary())
    }
}

/// A labeled bracket `(begin, end, constituent)` over inclusive token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct LabeledBracket {
    pub begin: usize,
    pub end: usize,
    pub constituent: Constituent,
}

/// A binarized phrase-structure tree with nodes numbered in derivation (post-) order.
///
/// Children are always pushed before their parent, so a node id doubles as the
/// index of the shift-reduce step that creates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfgTree {
    words: Vec<TaggedWord>,
    nodes: Vec<CfgTreeNode>,
    parents: Vec<Option<NodeId>>,
    spans: Vec<(usize, usize)>,
}

impl CfgTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[TaggedWord] {
        &self.words
    }

    pub fn nodes(&self) -> &[CfgTreeNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&CfgTreeNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Inclusive token span of a node.
    pub fn span(&self, id: NodeId) -> Option<(usize, usize)> {
        self.spans.get(id.index()).copied()
    }

    /// The last pushed node, provided nothing has adopted it.
    pub fn root(&self) -> Option<NodeId> {
        let last = NodeId::from_index(self.nodes.len().checked_sub(1)?);
        self.parent(last).is_none().then_some(last)
    }

    pub fn push_word(&mut self, word: TaggedWord) -> usize {
        self.words.push(word);
        self.words.len() - 1
    }

    /// Adds a token and the leaf node standing for it.
    pub fn push_leaf(&mut self, word: TaggedWord) -> NodeId {
        let token = self.push_word(word);
        let id = NodeId::from_index(self.nodes.len());
        self.attach(CfgTreeNode::leaf(token), (token, token));
        id
    }

    pub fn push_unary(&mut self, constituent: Constituent, child: NodeId) -> Result<NodeId, TreeError> {
        let token = self.available(child)?.token;
        self.push_node(CfgTreeNode {
            constituent: constituent.extract(),
            flags: NodeFlags::CONSTITUENT | NodeFlags::SINGLE_CHILD,
            left_child: Some(child),
            right_child: None,
            token,
        })
    }

    pub fn push_binary(
        &mut self,
        constituent: Constituent,
        left: NodeId,
        right: NodeId,
        head_left: bool,
        temporary: bool,
    ) -> Result<NodeId, TreeError> {
        let head = if head_left { left } else { right };
        let token = self.available(head)?.token;
        let mut flags = NodeFlags::CONSTITUENT;
        flags.set(NodeFlags::HEAD_LEFT, head_left);
        flags.set(NodeFlags::TEMPORARY, temporary);
        self.push_node(CfgTreeNode {
            constituent: constituent.extract(),
            flags,
            left_child: Some(left),
            right_child: Some(right),
            token,
        })
    }

    /// Appends a fully described node, checking that its children exist and are unclaimed.
    pub fn push_node(&mut self, node: CfgTreeNode) -> Result<NodeId, TreeError> {
        let id = NodeId::from_index(self.nodes.len());

        let span = match (node.left_child, node.right_child) {
            (None, None) => {
                if node.token >= self.words.len() {
                    return Err(TreeError::MissingToken(node.token));
                }
                (node.token, node.token)
            }
            (Some(only), None) | (None, Some(only)) => {
                self.available(only)?;
                self.spans[only.index()]
            }
            (Some(left), Some(right)) => {
                self.available(left)?;
                self.available(right)?;
                (self.spans[left.index()].0, self.spans[right.index()].1)
            }
        };

        for child in node.left_child.into_iter().chain(node.right_child) {
            self.parents[child.index()] = Some(id);
        }
        self.attach(node, span);
        Ok(id)
    }

    /// Checks that exactly one node (the last) is left without a parent.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        let last = self.nodes.len() - 1;
        match self.parents[..last].iter().position(Option::is_none) {
            Some(orphan) => Err(TreeError::DetachedNode(NodeId::from_index(orphan))),
            None => Ok(()),
        }
    }

    /// Every constituent as a bracket, temporary ones keeping their temporary bit.
    pub fn labeled_brackets(&self) -> Vec<LabeledBracket> {
        self.nodes
            .iter()
            .zip(&self.spans)
            .filter(|(node, _)| node.is_constituent())
            .map(|(node, &(begin, end))| LabeledBracket {
                begin,
                end,
                constituent: node.full_constituent(),
            })
            .collect()
    }

    fn available(&self, child: NodeId) -> Result<&CfgTreeNode, TreeError> {
        let node = self.node(child).ok_or(TreeError::MissingNode(child))?;
        if let Some(parent) = self.parent(child) {
            return Err(TreeError::ChildAlreadyAttached { child, parent });
        }
        Ok(node)
    }

    fn attach(&mut self, node: CfgTreeNode, span: (usize, usize)) {
        self.nodes.push(node);
        self.parents.push(None);
        self.spans.push(span);
    }
}
