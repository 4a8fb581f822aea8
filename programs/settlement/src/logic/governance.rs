//! Governance operations
//!
//! Guarded mutations of admin identity, halt flag, deny list, consumer
//! identities and the tunable configuration. Every operation checks its
//! authority before touching state and records one event on change.

use anchor_lang::prelude::*;
use crate::error::SettlementError;
use crate::events::{
    AdminChanged, ConfigurationUpdated, DenyListAddressAdded, DenyListAddressRemoved,
    DenyListAuthoritySet, DequeuerAdded, DequeuerRemoved, EventLog, FillsConsumerChanged,
    SystemHalted, SystemUnhalted,
};
use crate::state::{ConfigurationInput, ConfigurationRegistry, DenyListRegistry, EngineState};

pub fn require_admin(state: &EngineState, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*signer, state.admin, SettlementError::UnauthorizedAdmin);
    Ok(())
}

pub fn require_deny_list_authority(state: &EngineState, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(
        *signer,
        state.deny_list_authority,
        SettlementError::UnauthorizedDenyListAuthority
    );
    Ok(())
}

// ============================================================================
// Identities
// ============================================================================

pub fn set_admin(
    state: &mut EngineState,
    signer: &Pubkey,
    new_admin: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_admin(state, signer)?;
    state.admin = new_admin;
    msg!("Admin changed to {}", new_admin);
    events.record(AdminChanged {
        changed_by: *signer,
        new_admin,
        timestamp: now,
    });
    Ok(())
}

pub fn set_deny_list_authority(
    state: &mut EngineState,
    signer: &Pubkey,
    new_authority: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_admin(state, signer)?;
    state.deny_list_authority = new_authority;
    msg!("Deny list authority set to {}", new_authority);
    events.record(DenyListAuthoritySet {
        changed_by: *signer,
        new_authority,
        timestamp: now,
    });
    Ok(())
}

// ============================================================================
// Deny list
// ============================================================================

pub fn add_to_deny_list(
    state: &EngineState,
    deny_list: &mut DenyListRegistry,
    signer: &Pubkey,
    address: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_deny_list_authority(state, signer)?;
    deny_list.insert(address, now)?;
    msg!("Denied {} ({} entries)", address, deny_list.len());
    events.record(DenyListAddressAdded {
        added_by: *signer,
        address,
        update_count: deny_list.update_count,
        timestamp: now,
    });
    Ok(())
}

pub fn remove_from_deny_list(
    state: &EngineState,
    deny_list: &mut DenyListRegistry,
    signer: &Pubkey,
    address: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_deny_list_authority(state, signer)?;
    deny_list.remove(&address, now)?;
    msg!("Allowed {} ({} entries)", address, deny_list.len());
    events.record(DenyListAddressRemoved {
        removed_by: *signer,
        address,
        update_count: deny_list.update_count,
        timestamp: now,
    });
    Ok(())
}

// ============================================================================
// Fills consumers
// ============================================================================

/// Returns whether the set changed. Adding a present dequeuer is a no-op.
pub fn add_dequeuer(
    state: &EngineState,
    config: &mut ConfigurationRegistry,
    signer: &Pubkey,
    dequeuer: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<bool> {
    require_admin(state, signer)?;
    let added = config.add_dequeuer(dequeuer)?;
    if added {
        msg!("Dequeuer {} added", dequeuer);
        events.record(DequeuerAdded {
            added_by: *signer,
            dequeuer,
            timestamp: now,
        });
    }
    Ok(added)
}

/// Returns whether the set changed. Removing an absent dequeuer is a no-op.
pub fn remove_dequeuer(
    state: &EngineState,
    config: &mut ConfigurationRegistry,
    signer: &Pubkey,
    dequeuer: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<bool> {
    require_admin(state, signer)?;
    let removed = config.remove_dequeuer(&dequeuer);
    if removed {
        msg!("Dequeuer {} removed", dequeuer);
        events.record(DequeuerRemoved {
            removed_by: *signer,
            dequeuer,
            timestamp: now,
        });
    }
    Ok(removed)
}

pub fn set_fills_consumer(
    state: &EngineState,
    config: &mut ConfigurationRegistry,
    signer: &Pubkey,
    new_consumer: Pubkey,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_admin(state, signer)?;
    config.fills_consumer = new_consumer;
    msg!("Fills consumer set to {}", new_consumer);
    events.record(FillsConsumerChanged {
        changed_by: *signer,
        new_consumer,
        timestamp: now,
    });
    Ok(())
}

// ============================================================================
// Halt and configuration
// ============================================================================

pub fn set_halted(
    state: &mut EngineState,
    signer: &Pubkey,
    halted: bool,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_admin(state, signer)?;
    require!(state.halted != halted, SettlementError::InvalidSystemState);
    state.halted = halted;
    if halted {
        msg!("System halted by {}", signer);
        events.record(SystemHalted {
            halted_by: *signer,
            timestamp: now,
        });
    } else {
        msg!("System unhalted by {}", signer);
        events.record(SystemUnhalted {
            unhalted_by: *signer,
            timestamp: now,
        });
    }
    Ok(())
}

pub fn update_configuration(
    state: &EngineState,
    config: &mut ConfigurationRegistry,
    signer: &Pubkey,
    input: &ConfigurationInput,
    now: i64,
    events: &mut EventLog,
) -> Result<()> {
    require_admin(state, signer)?;
    config.apply(input)?;
    msg!(
        "Configuration updated: trade size {}, max age {}s, coefficient {}, discount {}-{} bps",
        input.trade_size,
        input.price_maximum_age,
        input.coefficient,
        input.min_discount_bps,
        input.max_discount_bps
    );
    events.record(ConfigurationUpdated {
        changed_by: *signer,
        oracle_pubkey: input.oracle_pubkey,
        trade_size: input.trade_size,
        price_maximum_age: input.price_maximum_age,
        coefficient: input.coefficient,
        min_discount_bps: input.min_discount_bps,
        max_discount_bps: input.max_discount_bps,
        timestamp: now,
    });
    Ok(())
}
