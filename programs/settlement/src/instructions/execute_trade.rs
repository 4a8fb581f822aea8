//! Execute trade instruction
//!
//! Runs the trade state machine, publishes its events, then moves the
//! assets: tokens from the trader to the treasury, native units from the
//! vault PDA to the trader.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::{
    constants::{
        CONFIGURATION_REGISTRY_SEED, DENY_LIST_REGISTRY_SEED, ENGINE_STATE_SEED, NATIVE_VAULT_SEED,
    },
    error::SettlementError,
    events::EventLog,
    logic::{self, PriceAttestation, TradeRequest},
    state::{ConfigurationRegistry, DenyListRegistry, EngineState, FillsRegistry},
    utils::{transfer_native_from_vault, transfer_tokens_to_treasury},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ExecuteTradeParams {
    /// Highest ask accepted, in token base units per `UNIT`
    pub bid_price: u64,
    pub attestation: PriceAttestation,
}

#[derive(Accounts)]
pub struct ExecuteTrade<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        mut,
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
        seeds = [DENY_LIST_REGISTRY_SEED],
        bump = engine_state.bumps.deny_list_registry,
    )]
    pub deny_list_registry: Account<'info, DenyListRegistry>,

    #[account(
        mut,
        address = engine_state.fills_registry @ SettlementError::InvalidFillsRegistry,
    )]
    pub fills_registry: AccountLoader<'info, FillsRegistry>,

    #[account(
        mut,
        seeds = [NATIVE_VAULT_SEED],
        bump = engine_state.bumps.native_vault,
    )]
    pub native_vault: SystemAccount<'info>,

    #[account(address = engine_state.token_mint @ SettlementError::InvalidMint)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = token_mint,
        token::authority = trader,
        token::token_program = token_program,
    )]
    pub trader_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = engine_state.token_treasury @ SettlementError::InvalidTreasury,
    )]
    pub token_treasury: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn execute_trade_handler(ctx: Context<ExecuteTrade>, params: ExecuteTradeParams) -> Result<()> {
    let clock = Clock::get()?;
    let request = TradeRequest {
        trader: ctx.accounts.trader.key(),
        bid_price: params.bid_price,
        attestation: params.attestation,
        now: clock.unix_timestamp,
        current_tick: clock.slot,
    };

    let mut events = EventLog::new();
    let outcome = {
        let mut registry = ctx.accounts.fills_registry.load_mut()?;
        let mut ledger = registry.ledger()?;
        logic::execute_trade(
            &mut ctx.accounts.engine_state,
            &ctx.accounts.configuration_registry,
            &ctx.accounts.deny_list_registry,
            &mut ledger,
            &request,
            &mut events,
        )
    };
    // Rejection events are published even though the transaction fails
    events.emit_all();
    let settlement = outcome?;

    transfer_tokens_to_treasury(
        &ctx.accounts.trader_token_account,
        &ctx.accounts.token_treasury,
        &ctx.accounts.token_mint,
        &ctx.accounts.trader,
        &ctx.accounts.token_program,
        settlement.tokens_in,
    )?;

    let vault_bump = ctx.accounts.engine_state.bumps.native_vault;
    let seeds = &[NATIVE_VAULT_SEED, &[vault_bump]];
    let signer_seeds = &[&seeds[..]];

    transfer_native_from_vault(
        &ctx.accounts.native_vault,
        &ctx.accounts.trader.to_account_info(),
        &ctx.accounts.system_program,
        signer_seeds,
        settlement.native_out,
    )?;

    Ok(())
}
