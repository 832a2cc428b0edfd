use arbor_protocol::{Phrase, Tag};
use arbor_tree::{LexicalContext, SyntaxNode};

/// A test on a single node of the tree.
///
/// Temporary nodes are binarization artifacts and never match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// A constituent of this category.
    Phrase(Phrase),
    /// A token carrying this tag.
    Tag(Tag),
    /// Any node whose lexical head carries this tag.
    HeadTag(Tag),
    /// Any node whose lexical head is this word.
    Word(&'static str),
    AnyOf(&'static [Matcher]),
}

impl Matcher {
    pub fn matches(&self, node: &SyntaxNode, words: &LexicalContext) -> bool {
        if node.is_temporary() {
            return false;
        }
        match *self {
            Matcher::Phrase(phrase) => node.is_constituent() && node.phrase() == phrase,
            Matcher::Tag(tag) => node.is_leaf() && words.tag(node.head()) == Some(tag),
            Matcher::HeadTag(tag) => words.tag(node.head()) == Some(tag),
            Matcher::Word(word) => words.word(node.head()) == Some(word),
            Matcher::AnyOf(options) => options.iter().any(|m| m.matches(node, words)),
        }
    }
}

impl From<Phrase> for Matcher {
    fn from(phrase: Phrase) -> Self {
        Matcher::Phrase(phrase)
    }
}
