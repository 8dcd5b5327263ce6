//! Strongly-typed identifiers used across the engine.
//!
//! Downstream crates (catalog, operators) should *not* key storage by raw integers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The id allocated right after this one.
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(TableId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_id_ordering_and_display() {
        let a = TableId::new(3);
        let b = a.next();
        assert!(a < b);
        assert_eq!(b.get(), 4);
        assert_eq!(a.to_string(), "TableId(3)");
    }
}
