//! System initialization

use anchor_lang::prelude::*;
use crate::events::{EventLog, SystemInitialized};
use crate::state::{
    BumpRegistry, ConfigurationInput, ConfigurationRegistry, DenyListRegistry, EngineState,
    LedgerHeader,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeSystemParams {
    pub configuration: ConfigurationInput,
    /// Fill slots the ledger uses, at most `MAX_FILLS_CAPACITY`
    pub ledger_capacity: u64,
}

/// Accounts the engine is bound to for its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemAddresses {
    pub fills_registry: Pubkey,
    pub token_mint: Pubkey,
    pub token_treasury: Pubkey,
}

/// Initial contents of every program account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializedSystem {
    pub engine_state: EngineState,
    pub configuration: ConfigurationRegistry,
    pub deny_list: DenyListRegistry,
    pub ledger_header: LedgerHeader,
}

/// The initializer becomes admin and deny list authority. The current tick
/// counts as the last trade tick, so the first trade must land on a later one.
pub fn initialize_system(
    admin: Pubkey,
    params: &InitializeSystemParams,
    addresses: SystemAddresses,
    bumps: BumpRegistry,
    current_tick: u64,
    now: i64,
    events: &mut EventLog,
) -> Result<InitializedSystem> {
    let ledger_header = LedgerHeader::new(params.ledger_capacity)?;
    let configuration = ConfigurationRegistry::new(&params.configuration, params.ledger_capacity)?;

    let engine_state = EngineState {
        admin,
        deny_list_authority: admin,
        halted: false,
        last_trade_tick: current_tick,
        fills_registry: addresses.fills_registry,
        token_mint: addresses.token_mint,
        token_treasury: addresses.token_treasury,
        bumps,
    };

    events.record(SystemInitialized {
        admin,
        fills_registry: addresses.fills_registry,
        ledger_capacity: params.ledger_capacity,
        timestamp: now,
    });

    Ok(InitializedSystem {
        engine_state,
        configuration,
        deny_list: DenyListRegistry::default(),
        ledger_header,
    })
}
