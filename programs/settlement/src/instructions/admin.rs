use anchor_lang::prelude::*;
use crate::{
    constants::{CONFIGURATION_REGISTRY_SEED, ENGINE_STATE_SEED},
    events::EventLog,
    logic,
    state::{ConfigurationInput, ConfigurationRegistry, EngineState},
};

// ============================================================================
// Engine state updates
// ============================================================================

/// Accounts for admin operations on the engine state
#[derive(Accounts)]
pub struct EngineAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,
}

pub fn set_admin_handler(ctx: Context<EngineAdmin>, new_admin: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::set_admin(
        &mut ctx.accounts.engine_state,
        &ctx.accounts.authority.key(),
        new_admin,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

pub fn set_deny_list_authority_handler(
    ctx: Context<EngineAdmin>,
    new_authority: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::set_deny_list_authority(
        &mut ctx.accounts.engine_state,
        &ctx.accounts.authority.key(),
        new_authority,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

pub fn set_system_state_handler(ctx: Context<EngineAdmin>, halted: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::set_halted(
        &mut ctx.accounts.engine_state,
        &ctx.accounts.authority.key(),
        halted,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

// ============================================================================
// Configuration updates
// ============================================================================

/// Accounts for admin operations on the configuration registry
#[derive(Accounts)]
pub struct ConfigurationAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [CONFIGURATION_REGISTRY_SEED],
        bump = engine_state.bumps.configuration_registry,
    )]
    pub configuration_registry: Account<'info, ConfigurationRegistry>,
}

pub fn update_configuration_handler(
    ctx: Context<ConfigurationAdmin>,
    input: ConfigurationInput,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::update_configuration(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.configuration_registry,
        &ctx.accounts.authority.key(),
        &input,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

pub fn set_fills_consumer_handler(
    ctx: Context<ConfigurationAdmin>,
    new_consumer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::set_fills_consumer(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.configuration_registry,
        &ctx.accounts.authority.key(),
        new_consumer,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

pub fn add_dequeuer_handler(ctx: Context<ConfigurationAdmin>, dequeuer: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    let added = logic::add_dequeuer(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.configuration_registry,
        &ctx.accounts.authority.key(),
        dequeuer,
        now,
        &mut events,
    )?;
    if !added {
        msg!("Dequeuer {} already authorized", dequeuer);
    }
    events.emit_all();
    Ok(())
}

pub fn remove_dequeuer_handler(ctx: Context<ConfigurationAdmin>, dequeuer: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    let removed = logic::remove_dequeuer(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.configuration_registry,
        &ctx.accounts.authority.key(),
        dequeuer,
        now,
        &mut events,
    )?;
    if !removed {
        msg!("Dequeuer {} was not authorized", dequeuer);
    }
    events.emit_all();
    Ok(())
}
