use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::action::Action;
use crate::ids::SentenceId;
use crate::penn::TaggedWord;

/// The oracle action sequence of one training sentence.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct OracleSentence {
    pub id: SentenceId,
    pub words: Vec<TaggedWord>,
    pub actions: Vec<Action>,
}

/// Archived oracle sequences handed to an external trainer.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct OracleCorpus {
    pub version: u32,
    pub sentences: Vec<OracleSentence>,
}
