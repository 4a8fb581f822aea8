use anchor_lang::prelude::*;
use crate::{
    constants::{DENY_LIST_REGISTRY_SEED, ENGINE_STATE_SEED},
    events::EventLog,
    logic,
    state::{DenyListRegistry, EngineState},
};

#[derive(Accounts)]
pub struct DenyListAdmin<'info> {
    /// Must be the deny list authority
    pub authority: Signer<'info>,

    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        mut,
        seeds = [DENY_LIST_REGISTRY_SEED],
        bump = engine_state.bumps.deny_list_registry,
    )]
    pub deny_list_registry: Account<'info, DenyListRegistry>,
}

pub fn add_to_deny_list_handler(ctx: Context<DenyListAdmin>, address: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::add_to_deny_list(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.deny_list_registry,
        &ctx.accounts.authority.key(),
        address,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}

pub fn remove_from_deny_list_handler(ctx: Context<DenyListAdmin>, address: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();
    logic::remove_from_deny_list(
        &ctx.accounts.engine_state,
        &mut ctx.accounts.deny_list_registry,
        &ctx.accounts.authority.key(),
        address,
        now,
        &mut events,
    )?;
    events.emit_all();
    Ok(())
}
