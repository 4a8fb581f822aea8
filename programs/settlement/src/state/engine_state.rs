//! Engine state
//!
//! Identities, halt flag and the last trade tick. Mutated only by the trade
//! orchestrator (tick) and governance operations.

use anchor_lang::prelude::*;

/// Engine state account (PDA: `[ENGINE_STATE_SEED]`)
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Authority over governance operations
    pub admin: Pubkey,
    /// Authority over deny list edits
    pub deny_list_authority: Pubkey,
    /// When set, every trade is rejected
    pub halted: bool,
    /// Tick (slot) of the last settled trade
    pub last_trade_tick: u64,
    /// Zero-copy fills registry bound at initialization
    pub fills_registry: Pubkey,
    /// Mint of the token traders pay with
    pub token_mint: Pubkey,
    /// Token account collecting trader payments
    pub token_treasury: Pubkey,
    pub bumps: BumpRegistry,
}

impl EngineState {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        32 + // deny_list_authority
        1 +  // halted
        8 +  // last_trade_tick
        32 + // fills_registry
        32 + // token_mint
        32 + // token_treasury
        BumpRegistry::LEN; // bumps

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }
}

/// PDA bumps of the program-owned accounts
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BumpRegistry {
    pub configuration_registry: u8,
    pub engine_state: u8,
    pub deny_list_registry: u8,
    pub native_vault: u8,
}

impl BumpRegistry {
    pub const LEN: usize = 4;
}
