/// Overflow-safe arithmetic for every amount the program computes.
/// Checked operations return `SettlementError` instead of wrapping and log the
/// operands that failed, so a rejected trade or drain shows where it broke.

use anchor_lang::prelude::*;
use crate::error::SettlementError;

// ============================================================================
// Type Definitions
// ============================================================================

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
    fn safe_mul(self, v: T) -> Result<T>;
    fn safe_div(self, v: T) -> Result<T>;
}

// ============================================================================
// Core Implementation
// ============================================================================

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("Math overflow in safe_add: {} + {}", self, v);
                    SettlementError::MathOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("Math underflow in safe_sub: {} - {}", self, v);
                    SettlementError::MathOverflow.into()
                })
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or_else(|| {
                    msg!("Math overflow in safe_mul: {} * {}", self, v);
                    SettlementError::MathOverflow.into()
                })
            }

            fn safe_div(self, v: $type) -> Result<$type> {
                if v == 0 {
                    msg!("Division by zero in safe_div: {} / {}", self, v);
                    return Err(SettlementError::DivisionByZero.into());
                }
                self.checked_div(v).ok_or_else(|| {
                    msg!("Math error in safe_div: {} / {}", self, v);
                    SettlementError::MathOverflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u64);
impl_safe_math!(u128);

// ------------------------------------------------------------------------
// Narrowing
// ------------------------------------------------------------------------

/// Narrow a `u128` intermediate back to an on-chain `u64` amount
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        msg!("Math overflow narrowing {} to u64", value);
        SettlementError::MathOverflow.into()
    })
}

/// `floor(a * b / c)` with a `u128` intermediate
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    let product = (a as u128).safe_mul(b as u128)?;
    to_u64(product.safe_div(c as u128)?)
}

// ============================================================================
// Tests
// ============================================================================
