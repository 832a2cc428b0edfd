use arbor_protocol::Tag;
use arbor_tree::{Branches, LexicalContext, SyntaxNode};

use crate::matcher::Matcher;

/// Tree navigation over the binarized encoding that behaves as if temporary
/// nodes were flattened back into their parent.
///
/// Sister queries take the parent and one of its (flattened) children, the anchor,
/// and look at the anchor's siblings.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'w> {
    words: &'w LexicalContext,
}

impl<'w> Navigator<'w> {
    pub fn new(words: &'w LexicalContext) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &'w LexicalContext {
        self.words
    }

    pub fn is(&self, node: &SyntaxNode, matcher: Matcher) -> bool {
        matcher.matches(node, self.words)
    }

    /// Tag of the node's lexical head.
    pub fn head_tag(&self, node: &SyntaxNode) -> Option<Tag> {
        self.words.tag(node.head())
    }

    pub fn head_word(&self, node: &SyntaxNode) -> Option<&'w str> {
        self.words.word(node.head())
    }

    /// Children of the n-ary rule the node encodes, left to right.
    pub fn children<'n>(&self, node: &'n SyntaxNode) -> Vec<&'n SyntaxNode> {
        let mut out = Vec::new();
        collect_children(node, &mut out);
        out
    }

    /// `node < matcher`
    ///
    /// Only the branch away from the head is tested. When the head branch is a
    /// temporary node the search continues down it, so every child of the n-ary
    /// rule except the head itself is reachable.
    pub fn immediate_child<'n>(
        &self,
        node: &'n SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        match node.branches() {
            Branches::Leaf => None,
            Branches::Single(child) => self.is(child, matcher).then_some(child),
            Branches::Pair(left, right) => {
                let (head, other) = if node.head_left() { (left, right) } else { (right, left) };
                if self.is(other, matcher) {
                    Some(other)
                } else if head.is_temporary() {
                    self.immediate_child(head, matcher)
                } else {
                    None
                }
            }
        }
    }

    /// `node <# matcher`: the immediate child that carries the node's head.
    pub fn head_child<'n>(&self, node: &'n SyntaxNode, matcher: Matcher) -> Option<&'n SyntaxNode> {
        let mut child = node.head_child()?;
        while child.is_temporary() {
            child = child.head_child()?;
        }
        (child.head() == node.head() && self.is(child, matcher)).then_some(child)
    }

    /// `node << matcher`: first match in left-to-right preorder.
    pub fn dominates<'n>(&self, node: &'n SyntaxNode, matcher: Matcher) -> Option<&'n SyntaxNode> {
        for child in node.children() {
            if self.is(child, matcher) {
                return Some(child);
            }
            if let Some(found) = self.dominates(child, matcher) {
                return Some(found);
            }
        }
        None
    }

    /// `node <: matcher`
    pub fn only_child<'n>(&self, node: &'n SyntaxNode, matcher: Matcher) -> Option<&'n SyntaxNode> {
        match self.children(node).as_slice() {
            [only] if self.is(only, matcher) => Some(*only),
            _ => None,
        }
    }

    /// `anchor $++ matcher`: a sibling after the anchor matches or dominates a match.
    pub fn left_sister_of<'n>(
        &self,
        parent: &'n SyntaxNode,
        anchor: &SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        let siblings = self.children(parent);
        let at = position(&siblings, anchor)?;
        siblings[at + 1..]
            .iter()
            .find_map(|sibling| self.match_or_dominated(sibling, matcher))
    }

    /// `anchor $-- matcher`: a sibling before the anchor matches or dominates a match, nearest first.
    pub fn right_sister_of<'n>(
        &self,
        parent: &'n SyntaxNode,
        anchor: &SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        let siblings = self.children(parent);
        let at = position(&siblings, anchor)?;
        siblings[..at]
            .iter()
            .rev()
            .find_map(|sibling| self.match_or_dominated(sibling, matcher))
    }

    /// `anchor $+ matcher`
    pub fn immediate_left_sister_of<'n>(
        &self,
        parent: &'n SyntaxNode,
        anchor: &SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        let siblings = self.children(parent);
        let at = position(&siblings, anchor)?;
        siblings
            .get(at + 1)
            .copied()
            .filter(|sibling| self.is(sibling, matcher))
    }

    /// `anchor $- matcher`
    pub fn immediate_right_sister_of<'n>(
        &self,
        parent: &'n SyntaxNode,
        anchor: &SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        let siblings = self.children(parent);
        let at = position(&siblings, anchor)?;
        let before = at.checked_sub(1)?;
        Some(siblings[before]).filter(|sibling| self.is(sibling, matcher))
    }

    /// `anchor $ matcher`: any sibling on either side.
    pub fn sister_of<'n>(
        &self,
        parent: &'n SyntaxNode,
        anchor: &SyntaxNode,
        matcher: Matcher,
    ) -> Option<&'n SyntaxNode> {
        self.children(parent)
            .into_iter()
            .find(|sibling| !std::ptr::eq(*sibling, anchor) && self.is(sibling, matcher))
    }

    fn match_or_dominated<'n>(&self, node: &'n SyntaxNode, matcher: Matcher) -> Option<&'n SyntaxNode> {
        if self.is(node, matcher) {
            Some(node)
        } else {
            self.dominates(node, matcher)
        }
    }
}

fn collect_children<'n>(node: &'n SyntaxNode, out: &mut Vec<&'n SyntaxNode>) {
    for child in node.children() {
        if child.is_temporary() {
            collect_children(child, out);
        } else {
            out.push(child);
        }
    }
}

fn position(siblings: &[&SyntaxNode], anchor: &SyntaxNode) -> Option<usize> {
    siblings.iter().position(|sibling| std::ptr::eq(*sibling, anchor))
}
