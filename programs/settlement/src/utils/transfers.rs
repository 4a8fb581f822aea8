//! Token and native transfer helpers for trade settlement

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

/// Transfer tokens from the trader's account into the treasury
pub fn transfer_tokens_to_treasury<'info>(
    trader_token: &InterfaceAccount<'info, TokenAccount>,
    treasury: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    trader: &Signer<'info>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from: trader_token.to_account_info(),
        mint: mint.to_account_info(),
        to: treasury.to_account_info(),
        authority: trader.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Move native units from a signer into the vault PDA
pub fn fund_native_vault<'info>(
    payer: &Signer<'info>,
    vault: &SystemAccount<'info>,
    system_program: &Program<'info, System>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: payer.to_account_info(),
        to: vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(system_program.to_account_info(), cpi_accounts);
    system_program::transfer(cpi_ctx, amount)
}

/// Transfer native units out of the vault PDA to a recipient
pub fn transfer_native_from_vault<'info>(
    vault: &SystemAccount<'info>,
    recipient: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    vault_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: recipient.clone(),
    };
    let cpi_ctx =
        CpiContext::new_with_signer(system_program.to_account_info(), cpi_accounts, vault_seeds);
    system_program::transfer(cpi_ctx, amount)
}
