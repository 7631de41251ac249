//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every id is the position of its slot in an engine arena.  New ids come
//! from [`EventId::next`] and friends, which refuse to hand out the `INVALID`
//! sentinel or anything that does not fit the inner integer.

use std::fmt;

use crate::{DesError, DesResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for the next slot of an arena currently holding `len` entries.
            pub fn next(len: usize) -> DesResult<$name> {
                <$inner>::try_from(len)
                    .ok()
                    .filter(|&n| n != <$inner>::MAX)
                    .map($name)
                    .ok_or(DesError::IdsExhausted(stringify!($name)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an event in the simulation's event arena.
    pub struct EventId(u32);
}

typed_id! {
    /// Index of a process in the simulation's process table.
    pub struct ProcessId(u32);
}

typed_id! {
    /// Index of a capacity-limited resource.
    pub struct ResourceId(u32);
}

typed_id! {
    /// Index of a model-level category (e.g. a movie) keying shared state.
    pub struct CategoryId(u32);
}
