use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use instructions::*;
pub use state::*;

declare_id!("Sett1ement111111111111111111111111111111111");

#[program]
pub mod settlement {
    use super::*;

    // Setup
    pub fn initialize_system(
        ctx: Context<InitializeSystem>,
        params: logic::InitializeSystemParams,
    ) -> Result<()> {
        instructions::initialize_system_handler(ctx, params)
    }

    // Trading
    pub fn execute_trade(ctx: Context<ExecuteTrade>, params: ExecuteTradeParams) -> Result<()> {
        instructions::execute_trade_handler(ctx, params)
    }

    pub fn calculate_ask_price(
        ctx: Context<CalculateAskPrice>,
        attestation: logic::PriceAttestation,
    ) -> Result<u64> {
        instructions::calculate_ask_price_handler(ctx, attestation)
    }

    // Fills
    pub fn consume_fills(
        ctx: Context<ConsumeFills>,
        max_native_budget: u64,
    ) -> Result<ConsumptionResult> {
        instructions::consume_fills_handler(ctx, max_native_budget)
    }

    // Governance
    pub fn set_admin(ctx: Context<EngineAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::set_admin_handler(ctx, new_admin)
    }

    pub fn set_deny_list_authority(ctx: Context<EngineAdmin>, new_authority: Pubkey) -> Result<()> {
        instructions::set_deny_list_authority_handler(ctx, new_authority)
    }

    pub fn set_system_state(ctx: Context<EngineAdmin>, halted: bool) -> Result<()> {
        instructions::set_system_state_handler(ctx, halted)
    }

    pub fn update_configuration(
        ctx: Context<ConfigurationAdmin>,
        input: ConfigurationInput,
    ) -> Result<()> {
        instructions::update_configuration_handler(ctx, input)
    }

    pub fn set_fills_consumer(
        ctx: Context<ConfigurationAdmin>,
        new_consumer: Pubkey,
    ) -> Result<()> {
        instructions::set_fills_consumer_handler(ctx, new_consumer)
    }

    pub fn add_dequeuer(ctx: Context<ConfigurationAdmin>, dequeuer: Pubkey) -> Result<()> {
        instructions::add_dequeuer_handler(ctx, dequeuer)
    }

    pub fn remove_dequeuer(ctx: Context<ConfigurationAdmin>, dequeuer: Pubkey) -> Result<()> {
        instructions::remove_dequeuer_handler(ctx, dequeuer)
    }

    pub fn add_to_deny_list(ctx: Context<DenyListAdmin>, address: Pubkey) -> Result<()> {
        instructions::add_to_deny_list_handler(ctx, address)
    }

    pub fn remove_from_deny_list(ctx: Context<DenyListAdmin>, address: Pubkey) -> Result<()> {
        instructions::remove_from_deny_list_handler(ctx, address)
    }

    // Storage
    pub fn migrate_layout(ctx: Context<MigrateLayout>) -> Result<()> {
        instructions::migrate_layout_handler(ctx)
    }

    pub fn rollback_layout(ctx: Context<RollbackLayout>) -> Result<()> {
        instructions::rollback_layout_handler(ctx)
    }
}
