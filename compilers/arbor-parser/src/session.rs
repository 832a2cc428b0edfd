use std::sync::Arc;

use arbor_rules::Catalogue;
use arbor_tree::LexicalContext;

use crate::config::ParserConfig;

/// Everything the states of one sentence share.
#[derive(Debug, Clone)]
pub struct ParseSession {
    words: LexicalContext,
    catalogue: Catalogue,
    config: ParserConfig,
}

impl ParseSession {
    pub fn new(words: LexicalContext, catalogue: Catalogue, config: ParserConfig) -> Arc<Self> {
        Arc::new(Self {
            words,
            catalogue,
            config,
        })
    }

    /// Standard catalogue and default configuration.
    pub fn standard(words: LexicalContext) -> Arc<Self> {
        Self::new(words, Catalogue::standard(), ParserConfig::default())
    }

    pub fn words(&self) -> &LexicalContext {
        &self.words
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}
