//! Read-only ask price query
//!
//! Validates an attestation and returns the ask a trade would clear at in the
//! current slot, as return data.

use anchor_lang::prelude::*;
use crate::{
    constants::{CONFIGURATION_REGISTRY_SEED, ENGINE_STATE_SEED},
    logic::{ask_price, discount_rate, validate_attestation, PriceAttestation},
    state::{ConfigurationRegistry, EngineState},
};

#[derive(Accounts)]
pub struct CalculateAskPrice<'info> {
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
}

pub fn calculate_ask_price_handler(
    ctx: Context<CalculateAskPrice>,
    attestation: PriceAttestation,
) -> Result<u64> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.configuration_registry;
    let last_trade_tick = ctx.accounts.engine_state.last_trade_tick;

    let reading = validate_attestation(
        &attestation,
        &config.oracle_pubkey,
        config.price_maximum_age,
        clock.unix_timestamp,
    )?;
    let params = config.decay_parameters();
    let ask = ask_price(&reading, &params, clock.slot, last_trade_tick)?;

    let elapsed = clock.slot.saturating_sub(last_trade_tick);
    msg!(
        "Ask {} from oracle price {} (discount {}e-8 after {} ticks)",
        ask,
        reading.price,
        discount_rate(&params, elapsed)?,
        elapsed
    );
    Ok(ask)
}
