//! Program state
//!
//! Borsh accounts for configuration, engine state and the deny list, the
//! zero-copy fills registry, and the v2 migration layouts.

pub mod configuration;
pub mod deny_list;
pub mod engine_state;
pub mod fills_ledger;
pub mod layout_v2;

pub use configuration::*;
pub use deny_list::*;
pub use engine_state::*;
pub use fills_ledger::*;
pub use layout_v2::*;

// Compile-time assertions for zero_copy struct sizes
#[cfg(feature = "size-checks")]
mod size_assertions {
    use super::*;
    use crate::constants::MAX_FILLS_CAPACITY;
    use static_assertions::const_assert_eq;

    const_assert_eq!(core::mem::size_of::<Fill>(), 16);
    const_assert_eq!(core::mem::size_of::<LedgerHeader>(), 64);

    // 8 (discriminator) + 64 (header) + 16 * MAX_FILLS_CAPACITY (slots)
    const_assert_eq!(FillsRegistry::LEN, 8 + 64 + 16 * MAX_FILLS_CAPACITY);
    // Must fit in a single account
    static_assertions::const_assert!(FillsRegistry::LEN <= 10 * 1024 * 1024);
}
