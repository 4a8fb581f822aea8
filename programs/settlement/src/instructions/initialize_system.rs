//! Initialize system instruction

use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::{
    constants::{
        CONFIGURATION_REGISTRY_SEED, DENY_LIST_REGISTRY_SEED, ENGINE_STATE_SEED, NATIVE_VAULT_SEED,
    },
    error::SettlementError,
    events::EventLog,
    logic::{self, InitializeSystemParams, SystemAddresses},
    state::{BumpRegistry, ConfigurationRegistry, DenyListRegistry, EngineState, FillsRegistry},
    utils::fund_native_vault,
};

#[derive(Accounts)]
pub struct InitializeSystem<'info> {
    /// Upgrade authority of the program; becomes admin and deny list authority
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = EngineState::LEN,
        seeds = [ENGINE_STATE_SEED],
        bump,
    )]
    pub engine_state: Account<'info, EngineState>,

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

    /// Allocated by the client at `FillsRegistry::LEN` bytes and owned by this program
    #[account(zero)]
    pub fills_registry: AccountLoader<'info, FillsRegistry>,

    /// Native vault PDA trades pay out of, topped up to rent exemption here
    #[account(
        mut,
        seeds = [NATIVE_VAULT_SEED],
        bump,
    )]
    pub native_vault: SystemAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Receives trader payments
    #[account(
        token::mint = token_mint,
        token::token_program = token_program,
    )]
    pub token_treasury: InterfaceAccount<'info, TokenAccount>,

    /// Loader data of this program; the signer must hold its upgrade authority
    #[account(
        seeds = [crate::ID.as_ref()],
        bump,
        seeds::program = bpf_loader_upgradeable::ID,
        constraint = program_data.upgrade_authority_address == Some(admin.key())
            @ SettlementError::UnauthorizedAdmin,
    )]
    pub program_data: Account<'info, ProgramData>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_system_handler(
    ctx: Context<InitializeSystem>,
    params: InitializeSystemParams,
) -> Result<()> {
    let clock = Clock::get()?;
    let mut events = EventLog::new();

    let bumps = BumpRegistry {
        configuration_registry: ctx.bumps.configuration_registry,
        engine_state: ctx.bumps.engine_state,
        deny_list_registry: ctx.bumps.deny_list_registry,
        native_vault: ctx.bumps.native_vault,
    };
    let addresses = SystemAddresses {
        fills_registry: ctx.accounts.fills_registry.key(),
        token_mint: ctx.accounts.token_mint.key(),
        token_treasury: ctx.accounts.token_treasury.key(),
    };

    let system = logic::initialize_system(
        ctx.accounts.admin.key(),
        &params,
        addresses,
        bumps,
        clock.slot,
        clock.unix_timestamp,
        &mut events,
    )?;

    ctx.accounts.engine_state.set_inner(system.engine_state);
    ctx.accounts.configuration_registry.set_inner(system.configuration);
    ctx.accounts.deny_list_registry.set_inner(system.deny_list);
    ctx.accounts.fills_registry.load_init()?.header = system.ledger_header;

    let rent_exempt_minimum = Rent::get()?.minimum_balance(0);
    let top_up = rent_exempt_minimum.saturating_sub(ctx.accounts.native_vault.lamports());
    if top_up > 0 {
        fund_native_vault(
            &ctx.accounts.admin,
            &ctx.accounts.native_vault,
            &ctx.accounts.system_program,
            top_up,
        )?;
    }

    msg!("Settlement system initialized");
    msg!("  Admin: {}", ctx.accounts.admin.key());
    msg!("  Oracle: {}", params.configuration.oracle_pubkey);
    msg!("  Trade size: {}", params.configuration.trade_size);
    msg!("  Ledger capacity: {}", params.ledger_capacity);
    msg!("  Last trade tick: {}", clock.slot);
    msg!("  Native vault funded: {}", top_up);

    events.emit_all();
    Ok(())
}
