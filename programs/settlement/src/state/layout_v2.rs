//! Version 2 storage layout
//!
//! Configuration and deny list records as stored under the `_v2` seeds.
//! Field meaning is unchanged from v1; fields are renamed and the records
//! carry the time they were migrated.

use anchor_lang::prelude::*;
use crate::constants::{MAX_AUTHORIZED_DEQUEUERS, MAX_DENY_LIST_SIZE};

/// Configuration account, v2 (PDA: `[CONFIGURATION_REGISTRY_V2_SEED]`)
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConfigurationRegistryV2 {
    pub price_oracle_pubkey: Pubkey,
    pub native_trade_size: u64,
    pub price_maximum_age: i64,
    pub ledger_capacity: u64,
    pub decay_coefficient: u64,
    pub min_discount_bps: u64,
    pub max_discount_bps: u64,
    pub fills_consumer: Pubkey,
    pub authorized_dequeuers: Vec<Pubkey>,
    /// Unix timestamp of the v1 -> v2 migration
    pub migrated_at: i64,
}

impl ConfigurationRegistryV2 {
    pub const LEN: usize = 8 + // discriminator
        32 + // price_oracle_pubkey
        8 +  // native_trade_size
        8 +  // price_maximum_age
        8 +  // ledger_capacity
        8 +  // decay_coefficient
        8 +  // min_discount_bps
        8 +  // max_discount_bps
        32 + // fills_consumer
        4 + (32 * MAX_AUTHORIZED_DEQUEUERS) + // authorized_dequeuers
        8; // migrated_at
}

/// Deny list account, v2 (PDA: `[DENY_LIST_REGISTRY_V2_SEED]`)
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DenyListRegistryV2 {
    pub denied_addresses: Vec<Pubkey>,
    pub last_updated: i64,
    pub update_count: u64,
    /// Unix timestamp of the v1 -> v2 migration
    pub migrated_at: i64,
}

impl DenyListRegistryV2 {
    pub const LEN: usize = 8 + // discriminator
        4 + (32 * MAX_DENY_LIST_SIZE) + // denied_addresses
        8 + // last_updated
        8 + // update_count
        8; // migrated_at
}
