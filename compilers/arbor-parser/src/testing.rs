use std::sync::Arc;

use arbor_protocol::{CfgTree, Constituent, NodeId, Phrase, Tag, TaggedWord};
use arbor_rules::Catalogue;
use arbor_tree::LexicalContext;
use proptest::prelude::*;

use crate::config::ParserConfig;
use crate::session::ParseSession;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn the_cat_sat() -> Arc<ParseSession> {
    ParseSession::standard(LexicalContext::from_pairs([
        ("The", Tag::DT),
        ("cat", Tag::NN),
        ("sat", Tag::VBD),
    ]))
}

pub fn session_for(tree: &CfgTree, config: ParserConfig) -> Arc<ParseSession> {
    ParseSession::new(LexicalContext::new(tree.words().to_vec()), Catalogue::standard(), config)
}

const TAGS: &[Tag] = &[
    Tag::DT,
    Tag::JJ,
    Tag::NN,
    Tag::NNP,
    Tag::VBD,
    Tag::CC,
    Tag::CD,
    Tag::IN,
    Tag::EX,
    Tag::TO,
    Tag::Comma,
];
const PHRASES: &[Phrase] = &[
    Phrase::NP,
    Phrase::VP,
    Phrase::S,
    Phrase::ADJP,
    Phrase::SQ,
    Phrase::SBAR,
    Phrase::PP,
    Phrase::WHNP,
    Phrase::CONJP,
];

/// Reads shape decisions off a byte string; running out yields zeroes.
struct Shaper<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl Shaper<'_> {
    fn next(&mut self) -> usize {
        let byte = self.bytes.get(self.at).copied().unwrap_or(0);
        self.at += 1;
        byte as usize
    }

    fn subtree(&mut self, tree: &mut CfgTree, len: usize, root: bool) -> NodeId {
        if len == 1 {
            let tag = TAGS[self.next() % TAGS.len()];
            let word = format!("w{}", tree.words().len());
            let leaf = tree.push_leaf(TaggedWord::new(word, tag));
            if self.next() % 4 == 0 {
                let phrase = PHRASES[self.next() % PHRASES.len()];
                return tree.push_unary(phrase.into(), leaf).expect("fresh leaf");
            }
            return leaf;
        }
        let split = 1 + self.next() % (len - 1);
        let left = self.subtree(tree, split, false);
        let right = self.subtree(tree, len - split, false);
        let phrase = PHRASES[self.next() % PHRASES.len()];
        let flags = self.next();
        let temporary = !root && flags & 2 == 2;
        tree.push_binary(Constituent::new(phrase), left, right, flags & 1 == 1, temporary)
            .expect("fresh children")
    }
}

/// Random binarized reference trees over one to eight words.
pub fn gold_tree() -> impl Strategy<Value = CfgTree> {
    (1usize..=8, proptest::collection::vec(any::<u8>(), 64)).prop_map(|(len, bytes)| {
        let mut tree = CfgTree::new();
        Shaper { bytes: &bytes, at: 0 }.subtree(&mut tree, len, true);
        tree
    })
}
