//! Company and station identifiers.
//!
//! Both are small integers in the world model, wrapped so an owner can never
//! be passed where a station is expected.  `MAX` of the inner type is the
//! "none" sentinel.

use std::fmt;

/// Newtype over a small integer with an `INVALID` sentinel.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in a per-id table.
            #[inline]
            pub fn index(self) -> usize {
                usize::from(self.0)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}#{}", stringify!($name), self.0)
                } else {
                    write!(f, "{}#-", stringify!($name))
                }
            }
        }
    };
}

typed_id! {
    /// Index of a station.  Every tile of a station footprint carries the same id.
    pub struct StationId(u16);
}

typed_id! {
    /// Owner of a piece of infrastructure: a company (`0..MAX_COMPANIES`) or
    /// one of the special non-company owners below.
    pub struct Owner(u8);
}

impl Owner {
    /// Number of company slots.
    pub const MAX_COMPANIES: u8 = 15;

    /// Town-owned (public) infrastructure, e.g. town roads.
    pub const TOWN: Owner = Owner(0x0F);

    /// Unowned tiles (clear land, public roads without a builder).
    pub const NONE: Owner = Owner(0x10);

    /// Sea, rivers and canals without a company owner.
    pub const WATER: Owner = Owner(0x11);

    #[inline]
    pub fn is_company(self) -> bool {
        self.0 < Self::MAX_COMPANIES
    }
}
