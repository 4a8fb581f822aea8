//! Authorized draining of the fills ledger

use anchor_lang::prelude::*;
use crate::error::SettlementError;
use crate::events::{EventLog, FillsConsumed};
use crate::state::{ConfigurationRegistry, ConsumptionResult, FillsLedger};

pub fn consume_fills(
    config: &ConfigurationRegistry,
    ledger: &mut FillsLedger<'_>,
    consumer: &Pubkey,
    max_native_budget: u64,
    now: i64,
    events: &mut EventLog,
) -> Result<ConsumptionResult> {
    require!(
        config.is_authorized_consumer(consumer),
        SettlementError::UnauthorizedFillConsumer
    );

    let result = ledger.consume(max_native_budget)?;

    msg!(
        "Consumed {} native, {} tokens, {} full fills; {} fills pending",
        result.native_consumed,
        result.token_consumed,
        result.fills_fully_consumed,
        ledger.count()
    );
    events.record(FillsConsumed {
        consumer: *consumer,
        native_consumed: result.native_consumed,
        token_consumed: result.token_consumed,
        fills_fully_consumed: result.fills_fully_consumed,
        timestamp: now,
    });
    Ok(result)
}
