use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::UnknownSymbol;

symbol_table! {
    /// Penn Treebank phrase categories. `None` is the unlabeled category used for
    /// tokens and for joined fragments.
    Phrase {
        None => "NONE",
        ADJP => "ADJP",
        ADVP => "ADVP",
        CONJP => "CONJP",
        FRAG => "FRAG",
        INTJ => "INTJ",
        LST => "LST",
        NAC => "NAC",
        NML => "NML",
        NP => "NP",
        NX => "NX",
        PP => "PP",
        PRN => "PRN",
        PRT => "PRT",
        QP => "QP",
        RRC => "RRC",
        S => "S",
        SBAR => "SBAR",
        SBARQ => "SBARQ",
        SINV => "SINV",
        SQ => "SQ",
        UCP => "UCP",
        VP => "VP",
        WHADJP => "WHADJP",
        WHADVP => "WHADVP",
        WHNP => "WHNP",
        WHPP => "WHPP",
        X => "X",
    }
}

symbol_table! {
    /// Penn Treebank part-of-speech tags.
    #[archive(archived = "ArchivedPosTag")]
    Tag {
        CC => "CC",
        CD => "CD",
        DT => "DT",
        EX => "EX",
        FW => "FW",
        IN => "IN",
        JJ => "JJ",
        JJR => "JJR",
        JJS => "JJS",
        LS => "LS",
        MD => "MD",
        NN => "NN",
        NNS => "NNS",
        NNP => "NNP",
        NNPS => "NNPS",
        PDT => "PDT",
        POS => "POS",
        PRP => "PRP",
        PRPS => "PRP$",
        RB => "RB",
        RBR => "RBR",
        RBS => "RBS",
        RP => "RP",
        SYM => "SYM",
        TO => "TO",
        UH => "UH",
        VB => "VB",
        VBD => "VBD",
        VBG => "VBG",
        VBN => "VBN",
        VBP => "VBP",
        VBZ => "VBZ",
        WDT => "WDT",
        WP => "WP",
        WPS => "WP$",
        WRB => "WRB",
        Comma => ",",
        Period => ".",
        Colon => ":",
        OpenQuote => "``",
        CloseQuote => "''",
        LRB => "-LRB-",
        RRB => "-RRB-",
        Hash => "#",
        Dollar => "$",
        Empty => "-NONE-",
    }
}

/// A phrase category plus the temporary bit that marks synthetic binarization nodes.
///
/// Equality compares the full code, so `VP*` never equals `VP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Constituent {
    phrase: Phrase,
    temporary: bool,
}

impl Constituent {
    pub const NONE: Constituent = Constituent::new(Phrase::None);

    pub const fn new(phrase: Phrase) -> Self {
        Self {
            phrase,
            temporary: false,
        }
    }

    pub const fn temporary(phrase: Phrase) -> Self {
        Self {
            phrase,
            temporary: true,
        }
    }

    pub const fn with_temporary(self, temporary: bool) -> Self {
        Self {
            phrase: self.phrase,
            temporary,
        }
    }

    pub const fn phrase(self) -> Phrase {
        self.phrase
    }

    pub const fn is_temporary(self) -> bool {
        self.temporary
    }

    pub fn is_none(self) -> bool {
        self.phrase == Phrase::None
    }

    /// The category with the temporary bit stripped.
    pub const fn extract(self) -> Self {
        Self::new(self.phrase)
    }

    pub fn clear(&mut self) {
        *self = Self::NONE;
    }

    /// Packed code: category in the high bits, temporary bit in bit 0.
    pub const fn code(self) -> u16 {
        ((self.phrase as u16) << 1) | (self.temporary as u16)
    }
}

impl Default for Constituent {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Phrase> for Constituent {
    fn from(phrase: Phrase) -> Self {
        Self::new(phrase)
    }
}

impl PartialEq<Phrase> for Constituent {
    fn eq(&self, other: &Phrase) -> bool {
        *self == Constituent::new(*other)
    }
}

impl fmt::Display for Constituent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase.as_str())?;
        if self.temporary {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl FromStr for Constituent {
    type Err = UnknownSymbol;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol.strip_suffix('*') {
            Some(base) => Ok(Self::temporary(base.parse().map_err(|_| {
                UnknownSymbol::new("Constituent", symbol)
            })?)),
            None => Ok(Self::new(symbol.parse()?)),
        }
    }
}

/// A token of the input sentence with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TaggedWord {
    pub word: String,
    pub tag: Tag,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: Tag) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }
}
