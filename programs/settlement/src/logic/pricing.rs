//! Decaying ask price
//!
//! The discount off the oracle price starts at `min_discount` right after a
//! trade and grows by `coefficient / 1e8` per elapsed tick until it saturates
//! at `max_discount`:
//!
//! ```text
//! discount = min(max_discount, min_discount + coefficient * elapsed)
//! ask      = floor(price * (1 - discount))
//! ```
//!
//! The discount is carried in 1e-8 units so sub-basis-point growth per tick is
//! kept; all intermediates are `u128`.

use anchor_lang::prelude::*;
use crate::constants::{BPS_TO_DISCOUNT_SCALE, DISCOUNT_SCALE, UNIT};
use crate::error::SettlementError;
use crate::logic::OracleReading;
use crate::state::DecayParameters;
use crate::utils::{mul_div_floor, to_u64, SafeMath};

/// Discount after `elapsed_ticks`, in `DISCOUNT_SCALE` units
pub fn discount_rate(params: &DecayParameters, elapsed_ticks: u64) -> Result<u64> {
    let floor = (params.min_discount_bps as u128).safe_mul(BPS_TO_DISCOUNT_SCALE as u128)?;
    let ceiling = (params.max_discount_bps as u128).safe_mul(BPS_TO_DISCOUNT_SCALE as u128)?;
    let growth = (params.coefficient as u128).safe_mul(elapsed_ticks as u128)?;
    to_u64(floor.safe_add(growth)?.min(ceiling))
}

/// Executable ask at `current_tick`
pub fn ask_price(
    reading: &OracleReading,
    params: &DecayParameters,
    current_tick: u64,
    last_trade_tick: u64,
) -> Result<u64> {
    let elapsed = current_tick.checked_sub(last_trade_tick).ok_or_else(|| {
        msg!(
            "Current tick {} precedes last trade tick {}",
            current_tick,
            last_trade_tick
        );
        error!(SettlementError::InvalidTradeTick)
    })?;
    let discount = discount_rate(params, elapsed)?;
    let retained = DISCOUNT_SCALE.safe_sub(discount)?;
    mul_div_floor(reading.price, retained, DISCOUNT_SCALE)
}

/// Tokens a trader pays for `trade_size` native units at `ask`
pub fn tokens_for_trade(ask: u64, trade_size: u64) -> Result<u64> {
    mul_div_floor(ask, trade_size, UNIT)
}
