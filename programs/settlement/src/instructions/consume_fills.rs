//! Consume fills instruction
//!
//! Drains settled fills up to a native budget on behalf of the configured
//! fills consumer or an authorized dequeuer. The consumed totals are
//! returned as return data.

use anchor_lang::prelude::*;
use crate::{
    constants::{CONFIGURATION_REGISTRY_SEED, ENGINE_STATE_SEED},
    error::SettlementError,
    events::EventLog,
    logic,
    state::{ConfigurationRegistry, ConsumptionResult, EngineState, FillsRegistry},
};

#[derive(Accounts)]
pub struct ConsumeFills<'info> {
    pub consumer: Signer<'info>,

    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bumps.engine_state,
    )]
    pub engine_state: Account<'info, EngineState>,

    #[account(
        seeds = [CONFIGURATION_REGISTRY_SEED],
        bump = engine_state.bumps.configuration_registry,
    )]
    pub configuration_registry: Account<'info, ConfigurationRegistry>,

    #[account(
        mut,
        address = engine_state.fills_registry @ SettlementError::InvalidFillsRegistry,
    )]
    pub fills_registry: AccountLoader<'info, FillsRegistry>,
}

pub fn consume_fills_handler(
    ctx: Context<ConsumeFills>,
    max_native_budget: u64,
) -> Result<ConsumptionResult> {
    let now = Clock::get()?.unix_timestamp;
    let mut events = EventLog::new();

    let result = {
        let mut registry = ctx.accounts.fills_registry.load_mut()?;
        let mut ledger = registry.ledger()?;
        logic::consume_fills(
            &ctx.accounts.configuration_registry,
            &mut ledger,
            &ctx.accounts.consumer.key(),
            max_native_budget,
            now,
            &mut events,
        )?
    };

    events.emit_all();
    Ok(result)
}
