use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(transparent)] // Ensure it has the same layout as u32
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(NodeId, "Position of a node in derivation order (leaves and constituents interleaved).");
define_id!(SentenceId, "Unique identifier for a sentence within an oracle corpus.");

impl NodeId {
    /// Node id for a derivation-order index.
    ///
    /// Sentences are bounded far below `u32::MAX` nodes; larger indices are a caller bug.
    pub fn from_index(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "node index {index} does not fit a NodeId");
        Self(index as u32)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
