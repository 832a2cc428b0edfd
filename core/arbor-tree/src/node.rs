use std::fmt;
use std::sync::Arc;

use arbor_protocol::{Constituent, NodeId, Phrase};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lexical::LexicalContext;
use crate::link::{Link, LinkDeriver};

/// Shared handle to an immutable node. Many candidate derivations may point at the same node.
pub type NodeRef = Arc<SyntaxNode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum NodeKind {
    Leaf,
    SingleChild,
    HeadLeft,
    HeadRight,
}

/// Inclusive token span `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn point(index: usize) -> Self {
        Self::new(index, index)
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[derive(Debug)]
enum Children {
    Leaf,
    Single(NodeRef),
    Pair(NodeRef, NodeRef),
}

/// Borrowed view of a node's children.
#[derive(Debug, Clone, Copy)]
pub enum Branches<'n> {
    Leaf,
    Single(&'n SyntaxNode),
    Pair(&'n SyntaxNode, &'n SyntaxNode),
}

/// A token or constituent of the binarized tree.
///
/// Nodes never change after construction. Dependency links are filled in by the
/// binary constructor before the node is handed out.
#[derive(Debug)]
pub struct SyntaxNode {
    id: NodeId,
    kind: NodeKind,
    constituent: Constituent,
    head: usize,
    span: Span,
    children: Children,
    links: Vec<Link>,
}

impl SyntaxNode {
    pub fn leaf(id: NodeId, constituent: Constituent, token: usize) -> Self {
        Self {
            id,
            kind: NodeKind::Leaf,
            constituent,
            head: token,
            span: Span::point(token),
            children: Children::Leaf,
            links: Vec::new(),
        }
    }

    /// Wraps `child` in a single-child constituent.
    ///
    /// # Panics
    /// If `constituent` carries the temporary bit; only binary reductions create temporary nodes.
    pub fn unary(id: NodeId, constituent: Constituent, child: NodeRef) -> Self {
        assert!(
            !constituent.is_temporary(),
            "unary node {} cannot be temporary ({})",
            id,
            constituent
        );
        Self {
            id,
            kind: NodeKind::SingleChild,
            constituent,
            head: child.head,
            span: child.span,
            children: Children::Single(child),
            links: Vec::new(),
        }
    }

    /// Combines two stack nodes and derives the dependency links the new configuration licenses.
    #[allow(clippy::too_many_arguments)]
    pub fn binary(
        id: NodeId,
        constituent: Constituent,
        left: NodeRef,
        right: NodeRef,
        head_left: bool,
        temporary: bool,
        deriver: &dyn LinkDeriver,
        words: &LexicalContext,
    ) -> Self {
        let (kind, head) = if head_left {
            (NodeKind::HeadLeft, left.head)
        } else {
            (NodeKind::HeadRight, right.head)
        };
        let mut node = Self {
            id,
            kind,
            constituent: constituent.with_temporary(temporary),
            head,
            span: Span::new(left.span.start, right.span.end),
            children: Children::Pair(left, right),
            links: Vec::new(),
        };

        for link in deriver.derive_links(&node, words) {
            node.push_link(link);
        }
        node
    }

    fn push_link(&mut self, link: Link) {
        if link.is_self_loop() {
            log::trace!("node {}: dropping self-loop {:?}", self.id, link);
            return;
        }
        self.links.push(link);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Category including the temporary bit.
    pub fn constituent(&self) -> Constituent {
        self.constituent
    }

    pub fn phrase(&self) -> Phrase {
        self.constituent.phrase()
    }

    pub fn is_temporary(&self) -> bool {
        self.constituent.is_temporary()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    pub fn is_constituent(&self) -> bool {
        !self.is_leaf()
    }

    pub fn single_child(&self) -> bool {
        self.kind == NodeKind::SingleChild
    }

    pub fn head_left(&self) -> bool {
        self.kind == NodeKind::HeadLeft
    }

    pub fn branches(&self) -> Branches<'_> {
        match &self.children {
            Children::Leaf => Branches::Leaf,
            Children::Single(child) => Branches::Single(child),
            Children::Pair(left, right) => Branches::Pair(left, right),
        }
    }

    /// The only child of a unary node, or the left child of a binary one.
    pub fn left_child(&self) -> Option<&SyntaxNode> {
        match &self.children {
            Children::Leaf => None,
            Children::Single(child) | Children::Pair(child, _) => Some(child.as_ref()),
        }
    }

    pub fn right_child(&self) -> Option<&SyntaxNode> {
        match &self.children {
            Children::Pair(_, right) => Some(right.as_ref()),
            _ => None,
        }
    }

    pub fn left_ref(&self) -> Option<&NodeRef> {
        match &self.children {
            Children::Leaf => None,
            Children::Single(child) | Children::Pair(child, _) => Some(child),
        }
    }

    pub fn right_ref(&self) -> Option<&NodeRef> {
        match &self.children {
            Children::Pair(_, right) => Some(right),
            _ => None,
        }
    }

    /// Direct children of the binary encoding, left to right.
    pub fn children(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.left_child().into_iter().chain(self.right_child())
    }

    /// Child whose head is the head of this node.
    pub fn head_child(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::Leaf => None,
            NodeKind::SingleChild | NodeKind::HeadLeft => self.left_child(),
            NodeKind::HeadRight => self.right_child(),
        }
    }
}

impl Clone for SyntaxNode {
    /// Copies the scalar fields and shares the children; derived links are not copied.
    fn clone(&self) -> Self {
        let children = match &self.children {
            Children::Leaf => Children::Leaf,
            Children::Single(child) => Children::Single(Arc::clone(child)),
            Children::Pair(left, right) => Children::Pair(Arc::clone(left), Arc::clone(right)),
        };
        Self {
            id: self.id,
            kind: self.kind,
            constituent: self.constituent,
            head: self.head,
            span: self.span,
            children,
            links: Vec::new(),
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        let same_children = match (&self.children, &other.children) {
            (Children::Leaf, Children::Leaf) => true,
            (Children::Single(a), Children::Single(b)) => Arc::ptr_eq(a, b),
            (Children::Pair(al, ar), Children::Pair(bl, br)) => Arc::ptr_eq(al, bl) && Arc::ptr_eq(ar, br),
            _ => false,
        };
        self.id == other.id
            && self.kind == other.kind
            && self.constituent == other.constituent
            && self.head == other.head
            && self.span == other.span
            && same_children
    }
}

impl Eq for SyntaxNode {}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {} head={}", self.id, self.constituent, self.span, self.head)
    }
}
