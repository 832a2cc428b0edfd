#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod error;
pub mod ids;
pub mod penn;
pub mod action;
pub mod dependency;
pub mod tree;
pub mod model;

pub use action::Action;
pub use dependency::DependencyLabel;
pub use error::{TreeError, UnknownSymbol};
pub use ids::{NodeId, SentenceId};
pub use model::*;
pub use penn::{Constituent, Phrase, Tag, TaggedWord};
pub use tree::{CfgTree, CfgTreeNode, LabeledBracket, NodeFlags};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn sample_tree() -> CfgTree {
        // (S (NP (DT the) (NN cat)) (VBD sat))
        let mut tree = CfgTree::new();
        let the = tree.push_leaf(TaggedWord::new("the", Tag::DT));
        let cat = tree.push_leaf(TaggedWord::new("cat", Tag::NN));
        let np = tree.push_binary(Phrase::NP.into(), the, cat, false, false).unwrap();
        let sat = tree.push_leaf(TaggedWord::new("sat", Tag::VBD));
        tree.push_binary(Phrase::S.into(), np, sat, false, false).unwrap();
        tree
    }

    #[test]
    fn test_action_serialization() {
        let original = Action::ReduceBinary {
            constituent: Phrase::VP.into(),
            head_left: true,
            temporary: true,
        };

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Action");
        let deserialized: Action = from_bytes(&bytes).expect("Failed to deserialize Action");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_corpus_serialization() {
        let original = OracleCorpus {
            version: 1,
            sentences: vec![OracleSentence {
                id: SentenceId::new(7),
                words: vec![TaggedWord::new("Dogs", Tag::NNS), TaggedWord::new("bark", Tag::VBP)],
                actions: vec![
                    Action::Shift(Constituent::NONE),
                    Action::Shift(Constituent::NONE),
                    Action::ReduceBinary {
                        constituent: Phrase::S.into(),
                        head_left: false,
                        temporary: false,
                    },
                    Action::ReduceRoot,
                ],
            }],
        };

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize OracleCorpus");
        let deserialized: OracleCorpus = from_bytes(&bytes).expect("Failed to deserialize OracleCorpus");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<NodeId>(), 4);
        assert_eq!(core::mem::size_of::<Option<NodeId>>(), 8);
    }

    #[test]
    fn test_symbol_spelling() {
        assert_eq!("PRP$".parse::<Tag>(), Ok(Tag::PRPS));
        assert_eq!(Tag::Comma.to_string(), ",");
        assert_eq!("NP*".parse::<Constituent>(), Ok(Constituent::temporary(Phrase::NP)));
        assert!("NPX".parse::<Phrase>().is_err());
        assert_eq!(DependencyLabel::Nsubj.as_str(), "nsubj");

        for phrase in Phrase::ALL {
            assert_eq!(phrase.as_str().parse::<Phrase>(), Ok(*phrase));
        }
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Shift(Constituent::NONE).to_string(), "SHIFT");
        assert_eq!(Action::ReduceUnary(Phrase::NP.into()).to_string(), "REDUCE_UNARY NP");
        let binary = Action::ReduceBinary {
            constituent: Phrase::VP.into(),
            head_left: true,
            temporary: true,
        };
        assert_eq!(binary.to_string(), "REDUCE_BINARY_L VP*");
        assert_eq!(binary.constituent(), Some(Constituent::temporary(Phrase::VP)));
        assert_eq!(binary.stack_delta(), -1);
    }

    #[test]
    fn test_tree_structure() {
        let tree = sample_tree();

        assert!(tree.validate().is_ok());
        assert_eq!(tree.root(), Some(NodeId::new(4)));
        assert_eq!(tree.parent(NodeId::new(0)), Some(NodeId::new(2)));
        assert_eq!(tree.span(NodeId::new(4)), Some((0, 2)));
        // Head follows the right child in both reductions.
        assert_eq!(tree.node(NodeId::new(4)).unwrap().token, 2);
        assert_eq!(tree.node(NodeId::new(2)).unwrap().token, 1);
    }

    #[test]
    fn test_tree_rejects_reused_child() {
        let mut tree = sample_tree();
        let err = tree.push_unary(Phrase::NP.into(), NodeId::new(0)).unwrap_err();
        assert_eq!(
            err,
            TreeError::ChildAlreadyAttached {
                child: NodeId::new(0),
                parent: NodeId::new(2)
            }
        );
        assert_eq!(
            tree.push_unary(Phrase::NP.into(), NodeId::new(9)),
            Err(TreeError::MissingNode(NodeId::new(9)))
        );
    }

    #[test]
    fn test_tree_detects_orphans() {
        let mut tree = CfgTree::new();
        assert_eq!(tree.validate(), Err(TreeError::Empty));
        tree.push_leaf(TaggedWord::new("a", Tag::DT));
        tree.push_leaf(TaggedWord::new("b", Tag::NN));
        assert_eq!(tree.validate(), Err(TreeError::DetachedNode(NodeId::new(0))));
    }

    #[test]
    fn test_labeled_brackets_keep_temporary_bit() {
        let mut tree = CfgTree::new();
        let a = tree.push_leaf(TaggedWord::new("big", Tag::JJ));
        let b = tree.push_leaf(TaggedWord::new("red", Tag::JJ));
        let c = tree.push_leaf(TaggedWord::new("ball", Tag::NN));
        let tmp = tree.push_binary(Phrase::NP.into(), b, c, false, true).unwrap();
        tree.push_binary(Phrase::NP.into(), a, tmp, false, false).unwrap();

        let brackets = tree.labeled_brackets();
        assert_eq!(
            brackets,
            vec![
                LabeledBracket { begin: 1, end: 2, constituent: Constituent::temporary(Phrase::NP) },
                LabeledBracket { begin: 0, end: 2, constituent: Constituent::new(Phrase::NP) },
            ]
        );
    }
}
