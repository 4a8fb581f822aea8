//! Shared fixtures for the settlement integration tests

#![allow(dead_code)]

pub mod program;

use anchor_lang::prelude::*;
use ed25519_dalek::{Signer as _, SigningKey};
use settlement::constants::UNIT;
use settlement::error::SettlementError;
use settlement::events::EventLog;
use settlement::logic::{
    self, InitializeSystemParams, PriceAttestation, SystemAddresses, TradeRequest,
    TradeSettlement,
};
use settlement::state::{
    BumpRegistry, ConfigurationInput, ConfigurationRegistry, DenyListRegistry, EngineState,
    FillsLedgerBuffer,
};

pub const START: i64 = 1_700_000_000;

pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: SettlementError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(e.error_code_number, u32::from(expected), "got {}", e.error_name)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

/// Oracle signer plus every account the engine owns, held in memory
pub struct Engine {
    pub oracle: SigningKey,
    pub admin: Pubkey,
    pub state: EngineState,
    pub config: ConfigurationRegistry,
    pub deny_list: DenyListRegistry,
    pub ledger: FillsLedgerBuffer,
    pub events: EventLog,
}

impl Engine {
    /// Scenario configuration: 5%..50% discount, 0.009% per tick, 25 native per trade
    pub fn scenario(ledger_capacity: u64, start_tick: u64) -> Self {
        let oracle = SigningKey::from_bytes(&[3u8; 32]);
        Self::with_input(
            oracle.clone(),
            ConfigurationInput {
                oracle_pubkey: Pubkey::new_from_array(oracle.verifying_key().to_bytes()),
                trade_size: 25 * UNIT,
                price_maximum_age: 60,
                coefficient: 9_000,
                min_discount_bps: 500,
                max_discount_bps: 5_000,
            },
            ledger_capacity,
            start_tick,
        )
    }

    pub fn with_input(
        oracle: SigningKey,
        input: ConfigurationInput,
        ledger_capacity: u64,
        start_tick: u64,
    ) -> Self {
        let admin = Pubkey::new_unique();
        let mut events = EventLog::new();
        let system = logic::initialize_system(
            admin,
            &InitializeSystemParams {
                configuration: input,
                ledger_capacity,
            },
            SystemAddresses {
                fills_registry: Pubkey::new_unique(),
                token_mint: Pubkey::new_unique(),
                token_treasury: Pubkey::new_unique(),
            },
            BumpRegistry::default(),
            start_tick,
            START,
            &mut events,
        )
        .unwrap();

        let mut ledger = FillsLedgerBuffer::with_capacity(ledger_capacity).unwrap();
        ledger.header = system.ledger_header;

        Self {
            oracle,
            admin,
            state: system.engine_state,
            config: system.configuration,
            deny_list: system.deny_list,
            ledger,
            events,
        }
    }

    pub fn attest(&self, price: u64, timestamp: i64) -> PriceAttestation {
        let message = format!("{}|{}", price, timestamp);
        PriceAttestation {
            price,
            timestamp,
            signature: self.oracle.sign(message.as_bytes()).to_bytes().to_vec(),
        }
    }

    pub fn trade(
        &mut self,
        trader: Pubkey,
        bid_price: u64,
        oracle_price: u64,
        tick: u64,
    ) -> Result<TradeSettlement> {
        let request = TradeRequest {
            trader,
            bid_price,
            attestation: self.attest(oracle_price, START),
            now: START,
            current_tick: tick,
        };
        let mut ledger = self.ledger.ledger()?;
        logic::execute_trade(
            &mut self.state,
            &self.config,
            &self.deny_list,
            &mut ledger,
            &request,
            &mut self.events,
        )
    }

    pub fn quote(&self, oracle_price: u64, tick: u64) -> Result<u64> {
        let reading = logic::validate_attestation(
            &self.attest(oracle_price, START),
            &self.config.oracle_pubkey,
            self.config.price_maximum_age,
            START,
        )?;
        logic::ask_price(
            &reading,
            &self.config.decay_parameters(),
            tick,
            self.state.last_trade_tick,
        )
    }
}
