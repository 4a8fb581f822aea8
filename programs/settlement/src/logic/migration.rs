//! Storage layout migration
//!
//! Pure transforms between the v1 and v2 layouts of the configuration and
//! deny list records. Engine state (apart from the two bump entries), the
//! fills ledger and set membership are never touched. Bumps are re-derived
//! from each version's seeds, so `rollback_layout(migrate_layout(v1, t)) == v1`
//! for every v1 layout stored at its canonical addresses.

use anchor_lang::prelude::*;
use crate::constants::{
    CONFIGURATION_REGISTRY_SEED, CONFIGURATION_REGISTRY_V2_SEED, DENY_LIST_REGISTRY_SEED,
    DENY_LIST_REGISTRY_V2_SEED,
};
use crate::state::{
    BumpRegistry, ConfigurationRegistry, ConfigurationRegistryV2, DenyListRegistry,
    DenyListRegistryV2,
};

pub const LAYOUT_V1: u8 = 1;
pub const LAYOUT_V2: u8 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutV1 {
    pub configuration: ConfigurationRegistry,
    pub deny_list: DenyListRegistry,
    pub bumps: BumpRegistry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutV2 {
    pub configuration: ConfigurationRegistryV2,
    pub deny_list: DenyListRegistryV2,
    pub bumps: BumpRegistry,
}

/// Canonical bump of a single-seed program address
pub fn layout_bump(seed: &[u8]) -> u8 {
    Pubkey::find_program_address(&[seed], &crate::ID).1
}

pub fn migrate_layout(v1: LayoutV1, now: i64) -> LayoutV2 {
    let LayoutV1 {
        configuration,
        deny_list,
        bumps,
    } = v1;

    LayoutV2 {
        configuration: ConfigurationRegistryV2 {
            price_oracle_pubkey: configuration.oracle_pubkey,
            native_trade_size: configuration.trade_size,
            price_maximum_age: configuration.price_maximum_age,
            ledger_capacity: configuration.ledger_capacity,
            decay_coefficient: configuration.coefficient,
            min_discount_bps: configuration.min_discount_bps,
            max_discount_bps: configuration.max_discount_bps,
            fills_consumer: configuration.fills_consumer,
            authorized_dequeuers: configuration.authorized_dequeuers,
            migrated_at: now,
        },
        deny_list: DenyListRegistryV2 {
            denied_addresses: deny_list.denied_addresses,
            last_updated: deny_list.last_updated,
            update_count: deny_list.update_count,
            migrated_at: now,
        },
        bumps: BumpRegistry {
            configuration_registry: layout_bump(CONFIGURATION_REGISTRY_V2_SEED),
            deny_list_registry: layout_bump(DENY_LIST_REGISTRY_V2_SEED),
            ..bumps
        },
    }
}

pub fn rollback_layout(v2: LayoutV2) -> LayoutV1 {
    let LayoutV2 {
        configuration,
        deny_list,
        bumps,
    } = v2;

    LayoutV1 {
        configuration: ConfigurationRegistry {
            oracle_pubkey: configuration.price_oracle_pubkey,
            trade_size: configuration.native_trade_size,
            price_maximum_age: configuration.price_maximum_age,
            ledger_capacity: configuration.ledger_capacity,
            coefficient: configuration.decay_coefficient,
            min_discount_bps: configuration.min_discount_bps,
            max_discount_bps: configuration.max_discount_bps,
            fills_consumer: configuration.fills_consumer,
            authorized_dequeuers: configuration.authorized_dequeuers,
        },
        deny_list: DenyListRegistry {
            denied_addresses: deny_list.denied_addresses,
            last_updated: deny_list.last_updated,
            update_count: deny_list.update_count,
        },
        bumps: BumpRegistry {
            configuration_registry: layout_bump(CONFIGURATION_REGISTRY_SEED),
            deny_list_registry: layout_bump(DENY_LIST_REGISTRY_SEED),
            ..bumps
        },
    }
}
