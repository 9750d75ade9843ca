//! Strongly-typed identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// One id per draw cycle, carried on its log lines.
define_id!(DrawCycleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_ids_are_unique() {
        let a = DrawCycleId::new();
        let b = DrawCycleId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }
}
