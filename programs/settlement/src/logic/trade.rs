//! Trade orchestration
//!
//! Composes attestation validation, admission checks, pricing and the fills
//! ledger into one all-or-nothing trade. Asset movement is left to the
//! caller; the returned [`TradeSettlement`] says what to move.

use anchor_lang::prelude::*;
use crate::error::SettlementError;
use crate::events::{
    AccessByDeniedTrader, AccessDuringSystemHalt, BidTooLow, EventLog, TradeSettled,
};
use crate::logic::{ask_price, tokens_for_trade, validate_attestation, PriceAttestation};
use crate::state::{ConfigurationRegistry, DenyListRegistry, EngineState, Fill, FillsLedger};

/// One trade attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRequest {
    pub trader: Pubkey,
    /// Highest ask the trader accepts, in token base units per `UNIT`
    pub bid_price: u64,
    pub attestation: PriceAttestation,
    pub now: i64,
    pub current_tick: u64,
}

/// Amounts a settled trade moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeSettlement {
    pub ask_price: u64,
    /// Native units owed to the trader
    pub native_out: u64,
    /// Tokens owed by the trader
    pub tokens_in: u64,
}

pub fn execute_trade(
    state: &mut EngineState,
    config: &ConfigurationRegistry,
    deny_list: &DenyListRegistry,
    ledger: &mut FillsLedger<'_>,
    request: &TradeRequest,
    events: &mut EventLog,
) -> Result<TradeSettlement> {
    let reading = validate_attestation(
        &request.attestation,
        &config.oracle_pubkey,
        config.price_maximum_age,
        request.now,
    )?;

    if state.halted {
        msg!("Trade by {} rejected: system halted", request.trader);
        events.record(AccessDuringSystemHalt {
            accessed_by: request.trader,
            timestamp: request.now,
        });
        return err!(SettlementError::SystemHalted);
    }

    if deny_list.contains(&request.trader) {
        msg!("Trade by {} rejected: trader denied", request.trader);
        events.record(AccessByDeniedTrader {
            accessed_by: request.trader,
            timestamp: request.now,
        });
        return err!(SettlementError::DeniedTrader);
    }

    require!(
        request.current_tick != state.last_trade_tick,
        SettlementError::OneTradePerTick
    );

    let ask = ask_price(
        &reading,
        &config.decay_parameters(),
        request.current_tick,
        state.last_trade_tick,
    )?;

    if request.bid_price < ask {
        msg!("Bid {} below ask {}", request.bid_price, ask);
        events.record(BidTooLow {
            trader: request.trader,
            bid_price: request.bid_price,
            ask_price: ask,
            native_amount: config.trade_size,
            timestamp: request.now,
        });
        return err!(SettlementError::BidTooLow);
    }

    let native_out = config.trade_size;
    let tokens_in = tokens_for_trade(ask, native_out)?;

    // Enqueue before moving the tick so a full ledger leaves the state as it was
    ledger.enqueue(Fill {
        sol_in: native_out,
        token_out: tokens_in,
    })?;
    state.last_trade_tick = request.current_tick;

    msg!(
        "Trade settled: trader {}, ask {}, native {}, tokens {}",
        request.trader,
        ask,
        native_out,
        tokens_in
    );
    events.record(TradeSettled {
        trader: request.trader,
        bid_price: request.bid_price,
        ask_price: ask,
        native_amount: native_out,
        token_amount: tokens_in,
        tick: request.current_tick,
        ledger_count: ledger.count(),
        timestamp: request.now,
    });

    Ok(TradeSettlement {
        ask_price: ask,
        native_out,
        tokens_in,
    })
}
