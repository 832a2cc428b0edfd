pub mod lexical;
pub mod link;
pub mod node;

pub use lexical::LexicalContext;
pub use link::{Link, LinkDeriver, NoLinks};
pub use node::{Branches, NodeKind, NodeRef, Span, SyntaxNode};

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{Constituent, DependencyLabel, NodeId, Phrase, Tag};
    use std::sync::Arc;

    struct EveryPair(DependencyLabel);

    impl LinkDeriver for EveryPair {
        fn derive_links(&self, node: &SyntaxNode, _words: &LexicalContext) -> Vec<Link> {
            // One link per child head, including the head child (a self-loop).
            node.children()
                .map(|child| Link::new(self.0, node.head(), child.head()))
                .collect()
        }
    }

    fn words() -> LexicalContext {
        LexicalContext::from_pairs([("The", Tag::DT), ("cat", Tag::NN), ("sat", Tag::VBD)])
    }

    fn leaf(index: usize) -> NodeRef {
        Arc::new(SyntaxNode::leaf(NodeId::from_index(index), Constituent::NONE, index))
    }

    #[test]
    fn test_lexical_lookup() {
        let words = words();
        assert_eq!(words.len(), 3);
        assert_eq!(words.word(1), Some("cat"));
        assert_eq!(words.tag(2), Some(Tag::VBD));
        assert_eq!(words.tag(3), None);
    }

    #[test]
    fn test_leaf_node() {
        let node = SyntaxNode::leaf(NodeId::new(0), Constituent::NONE, 4);
        assert_eq!(node.kind(), NodeKind::Leaf);
        assert_eq!(node.head(), 4);
        assert_eq!(node.span(), Span::new(4, 4));
        assert!(node.left_child().is_none());
        assert!(matches!(node.branches(), Branches::Leaf));
    }

    #[test]
    fn test_binary_head_and_span() {
        let words = words();
        let np = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            leaf(0),
            leaf(1),
            false,
            false,
            &NoLinks,
            &words,
        );

        assert_eq!(np.kind(), NodeKind::HeadRight);
        assert_eq!(np.head(), 1);
        assert_eq!(np.span(), Span::new(0, 1));
        assert_eq!(np.head_child().map(SyntaxNode::head), Some(1));
        assert!(np.links().is_empty());

        let tmp = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::VP.into(),
            leaf(0),
            leaf(1),
            true,
            true,
            &NoLinks,
            &words,
        );
        assert_eq!(tmp.head(), 0);
        assert!(tmp.is_temporary());
        assert_eq!(tmp.constituent(), Constituent::temporary(Phrase::VP));
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let words = words();
        let node = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            leaf(0),
            leaf(1),
            false,
            false,
            &EveryPair(DependencyLabel::Amod),
            &words,
        );

        assert_eq!(node.links(), &[Link::new(DependencyLabel::Amod, 1, 0)]);
        assert!(node.links().iter().all(|link| !link.is_self_loop()));
    }

    #[test]
    fn test_unary_inherits_child() {
        let child = leaf(2);
        let vp = SyntaxNode::unary(NodeId::new(3), Phrase::VP.into(), Arc::clone(&child));
        assert_eq!(vp.kind(), NodeKind::SingleChild);
        assert_eq!(vp.head(), 2);
        assert_eq!(vp.span(), child.span());
        assert!(Arc::ptr_eq(vp.left_ref().unwrap(), &child));
        assert!(vp.right_child().is_none());
    }

    #[test]
    #[should_panic]
    fn test_unary_rejects_temporary() {
        SyntaxNode::unary(NodeId::new(1), Constituent::temporary(Phrase::NP), leaf(0));
    }

    #[test]
    fn test_equality_ignores_links() {
        let words = words();
        let (left, right) = (leaf(0), leaf(1));
        let linked = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            Arc::clone(&left),
            Arc::clone(&right),
            false,
            false,
            &EveryPair(DependencyLabel::Dep),
            &words,
        );
        let plain = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            left,
            right,
            false,
            false,
            &NoLinks,
            &words,
        );

        assert_eq!(linked, plain);
        assert!(linked.clone().links().is_empty());

        // Same shape over different child objects is a different node.
        let other = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            leaf(0),
            leaf(1),
            false,
            false,
            &NoLinks,
            &words,
        );
        assert_ne!(plain, other);
    }

    #[test]
    fn test_shared_children() {
        let words = words();
        let shared = leaf(0);
        let a = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::NP.into(),
            Arc::clone(&shared),
            leaf(1),
            false,
            false,
            &NoLinks,
            &words,
        );
        let b = SyntaxNode::binary(
            NodeId::new(2),
            Phrase::ADJP.into(),
            Arc::clone(&shared),
            leaf(1),
            true,
            false,
            &NoLinks,
            &words,
        );

        assert_eq!(Arc::strong_count(&shared), 3);
        assert!(std::ptr::eq(a.left_child().unwrap(), b.left_child().unwrap()));
    }
}
