use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Row numbers into the tables of a compiled lexicon.
macro_rules! table_id {
    ($name:ident, $table:literal) => {
        #[doc = concat!("Row of the ", $table, " table in a compiled lexicon.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(row: u32) -> Self {
                Self(row)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

table_id!(LemmaId, "lemma");
table_id!(GroupId, "group");
