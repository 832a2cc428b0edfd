/// Declares a closed symbol vocabulary: a `repr(u8)` enum that archives with rkyv,
/// round-trips through its treebank spelling and lists every member in `ALL`.
macro_rules! symbol_table {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
        #[archive(check_bytes)]
        #[repr(u8)]
        #[allow(clippy::upper_case_acronyms)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::UnknownSymbol;

            fn from_str(symbol: &str) -> Result<Self, Self::Err> {
                match symbol {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::error::UnknownSymbol::new(stringify!($name), symbol)),
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
