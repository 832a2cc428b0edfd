use arbor_protocol::{Tag, TaggedWord};

/// Read-only view of the tagged sentence being parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalContext {
    words: Vec<TaggedWord>,
}

impl LexicalContext {
    pub fn new(words: Vec<TaggedWord>) -> Self {
        Self { words }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Tag)>) -> Self {
        Self::new(pairs.into_iter().map(|(word, tag)| TaggedWord::new(word, tag)).collect())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaggedWord> {
        self.words.get(index)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.get(index).map(|w| w.word.as_str())
    }

    pub fn tag(&self, index: usize) -> Option<Tag> {
        self.get(index).map(|w| w.tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedWord> {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[TaggedWord] {
        &self.words
    }
}

impl From<Vec<TaggedWord>> for LexicalContext {
    fn from(words: Vec<TaggedWord>) -> Self {
        Self::new(words)
    }
}

impl<'a> IntoIterator for &'a LexicalContext {
    type Item = &'a TaggedWord;
    type IntoIter = std::slice::Iter<'a, TaggedWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
