//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they work as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` for
//! direct indexing into dense `Vec`s, but callers should prefer `.index()`.
//!
//! `Display` renders the compact form used in status lines and event logs
//! ("C7" = customer 7, "S4" = shelf 4), not the type name.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$tag` is the single-letter prefix used by `Display`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $tag, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A customer for the lifetime of one visit.  IDs are minted
    /// monotonically by the spawner and never reused within a run, so an
    /// event log can always be joined back to a unique visit.
    pub struct CustomerId(u32) = "C";
}

typed_id! {
    /// A shelf slot on the shop floor.  Each slot holds zero or one
    /// product instance.
    pub struct ShelfId(u32) = "S";
}

typed_id! {
    /// One physical product instance (one box on one shelf).  Distinct from
    /// `ProductId`: two copies of the same rulebook are two `ItemId`s.
    pub struct ItemId(u32) = "I";
}

typed_id! {
    /// A product definition in the catalog.  `u16` keeps catalog rows
    /// compact; a shop with 65k distinct product lines is not this shop.
    pub struct ProductId(u16) = "P";
}

typed_id! {
    /// A checkout desk.
    pub struct DeskId(u16) = "K";
}
