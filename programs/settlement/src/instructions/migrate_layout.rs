//! Layout migration instructions
//!
//! Move configuration and deny list between the v1 and v2 accounts. The old
//! accounts are closed to the admin; engine state keeps everything except the
//! two rebound bumps. Trading and consumption read the v1 accounts, so they
//! are unavailable while the v2 layout is live.

use anchor_lang::prelude::*;
use crate::{
    constants::{
        CONFIGURATION_REGISTRY_SEED, CONFIGURATION_REGISTRY_V2_SEED, DENY_LIST_REGISTRY_SEED,
        DENY_LIST_REGISTRY_V2_SEED, ENGINE_STATE_SEED,
    },
    events::{EventLog, LayoutMigrated},
    logic::{self, LayoutV1, LayoutV2, LAYOUT_V1, LAYOUT_V2},
    state::{
        ConfigurationRegistry, ConfigurationRegistryV2, DenyListRegistry, DenyListRegistryV2,
        EngineState,
    },
};

// ============================================================================
// v1 -> v2
// ============================================================================

#[derive(Accounts)]
pub struct MigrateLayout<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [CONFIGURATION_REGISTRY_SEED],
        bump = engine_state.bumps.configuration_registry,
        close = admin,
    )]
    pub configuration_registry: Account<'info, ConfigurationRegistry>,

    #[account(
        mut,
        seeds = [DENY_LIST_REGISTRY_SEED],
        bump = engine_state.bumps.deny_list_registry,
        close = admin,
    )]
    pub deny_list_registry: Account<'info, DenyListRegistry>,

    #[account(
        init,
        payer = admin,
        space = ConfigurationRegistryV2::LEN,
        seeds = [CONFIGURATION_REGISTRY_V2_SEED],
        bump,
    )]
    pub configuration_registry_v2: Account<'info, ConfigurationRegistryV2>,

    #[account(
        init,
        payer = admin,
        space = DenyListRegistryV2::LEN,
        seeds = [DENY_LIST_REGISTRY_V2_SEED],
        bump,
    )]
    pub deny_list_registry_v2: Account<'info, DenyListRegistryV2>,

    pub system_program: Program<'info, System>,
}

/// Freezes the engine: every instruction that derives the v1 seeds fails
/// against the rebound bumps until `rollback_layout` restores them.
pub fn migrate_layout_handler(ctx: Context<MigrateLayout>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let admin = ctx.accounts.admin.key();
    logic::require_admin(&ctx.accounts.engine_state, &admin)?;

    let v1 = LayoutV1 {
        configuration: (*ctx.accounts.configuration_registry).clone(),
        deny_list: (*ctx.accounts.deny_list_registry).clone(),
        bumps: ctx.accounts.engine_state.bumps,
    };
    let v2 = logic::migrate_layout(v1, now);

    ctx.accounts.engine_state.bumps = v2.bumps;
    ctx.accounts.configuration_registry_v2.set_inner(v2.configuration);
    ctx.accounts.deny_list_registry_v2.set_inner(v2.deny_list);

    msg!("Migrated configuration and deny list to layout v{}", LAYOUT_V2);

    let mut events = EventLog::new();
    events.record(LayoutMigrated {
        migrated_by: admin,
        from_version: LAYOUT_V1,
        to_version: LAYOUT_V2,
        timestamp: now,
    });
    events.emit_all();
    Ok(())
}

// ============================================================================
// v2 -> v1
// ============================================================================

#[derive(Accounts)]
pub struct RollbackLayout<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [CONFIGURATION_REGISTRY_V2_SEED],
        bump = engine_state.bumps.configuration_registry,
        close = admin,
    )]
    pub configuration_registry_v2: Account<'info, ConfigurationRegistryV2>,

    #[account(
        mut,
        seeds = [DENY_LIST_REGISTRY_V2_SEED],
        bump = engine_state.bumps.deny_list_registry,
        close = admin,
    )]
    pub deny_list_registry_v2: Account<'info, DenyListRegistryV2>,

    #[account(
        init,
        payer = admin,
        space = ConfigurationRegistry::LEN,
        seeds = [CONFIGURATION_REGISTRY_SEED],
        bump,
    )]
    pub configuration_registry: Account<'info, ConfigurationRegistry>,

    #[account(
        init,
        payer = admin,
        space = DenyListRegistry::LEN,
        seeds = [DENY_LIST_REGISTRY_SEED],
        bump,
    )]
    pub deny_list_registry: Account<'info, DenyListRegistry>,

    pub system_program: Program<'info, System>,
}

pub fn rollback_layout_handler(ctx: Context<RollbackLayout>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let admin = ctx.accounts.admin.key();
    logic::require_admin(&ctx.accounts.engine_state, &admin)?;

    let v2 = LayoutV2 {
        configuration: (*ctx.accounts.configuration_registry_v2).clone(),
        deny_list: (*ctx.accounts.deny_list_registry_v2).clone(),
        bumps: ctx.accounts.engine_state.bumps,
    };
    let v1 = logic::rollback_layout(v2);

    ctx.accounts.engine_state.bumps = v1.bumps;
    ctx.accounts.configuration_registry.set_inner(v1.configuration);
    ctx.accounts.deny_list_registry.set_inner(v1.deny_list);

    msg!("Rolled configuration and deny list back to layout v{}", LAYOUT_V1);

    let mut events = EventLog::new();
    events.record(LayoutMigrated {
        migrated_by: admin,
        from_version: LAYOUT_V2,
        to_version: LAYOUT_V1,
        timestamp: now,
    });
    events.emit_all();
    Ok(())
}
