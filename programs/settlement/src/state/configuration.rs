//! Configuration registry
//!
//! Tunable trade parameters plus the identities allowed to drain the fills
//! ledger. The trade parameters are replaced wholesale by the admin; the
//! consumer identities are edited one at a time.

use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, MAX_AUTHORIZED_DEQUEUERS, MAX_COEFFICIENT};
use crate::error::SettlementError;

/// Configuration account (PDA: `[CONFIGURATION_REGISTRY_SEED]`)
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConfigurationRegistry {
    /// Key the price attestations must be signed with
    pub oracle_pubkey: Pubkey,

    /// Native units moved by every trade
    pub trade_size: u64,

    /// Maximum distance (seconds) between attestation time and now, either direction
    pub price_maximum_age: i64,

    /// Number of fill slots the ledger was created with. Fixed at initialization.
    pub ledger_capacity: u64,

    /// Discount growth per elapsed tick, in 1e-8 fractions
    pub coefficient: u64,
    /// Discount floor (basis points)
    pub min_discount_bps: u64,
    /// Discount ceiling (basis points)
    pub max_discount_bps: u64,

    /// Single authorized fills consumer. `Pubkey::default()` means unset.
    pub fills_consumer: Pubkey,

    /// Additional identities allowed to drain the fills ledger
    pub authorized_dequeuers: Vec<Pubkey>,
}

impl ConfigurationRegistry {
    pub const LEN: usize = 8 + // discriminator
        32 + // oracle_pubkey
        8 +  // trade_size
        8 +  // price_maximum_age
        8 +  // ledger_capacity
        8 +  // coefficient
        8 +  // min_discount_bps
        8 +  // max_discount_bps
        32 + // fills_consumer
        4 + (32 * MAX_AUTHORIZED_DEQUEUERS); // authorized_dequeuers

    /// Build a registry from validated initialization input
    pub fn new(input: &ConfigurationInput, ledger_capacity: u64) -> Result<Self> {
        input.validate()?;
        Ok(Self {
            oracle_pubkey: input.oracle_pubkey,
            trade_size: input.trade_size,
            price_maximum_age: input.price_maximum_age,
            ledger_capacity,
            coefficient: input.coefficient,
            min_discount_bps: input.min_discount_bps,
            max_discount_bps: input.max_discount_bps,
            fills_consumer: Pubkey::default(),
            authorized_dequeuers: Vec::new(),
        })
    }

    /// Replace every tunable trade parameter. Consumer identities and the
    /// ledger capacity are left alone.
    pub fn apply(&mut self, input: &ConfigurationInput) -> Result<()> {
        input.validate()?;
        self.oracle_pubkey = input.oracle_pubkey;
        self.trade_size = input.trade_size;
        self.price_maximum_age = input.price_maximum_age;
        self.coefficient = input.coefficient;
        self.min_discount_bps = input.min_discount_bps;
        self.max_discount_bps = input.max_discount_bps;
        Ok(())
    }

    pub fn decay_parameters(&self) -> DecayParameters {
        DecayParameters {
            coefficient: self.coefficient,
            min_discount_bps: self.min_discount_bps,
            max_discount_bps: self.max_discount_bps,
        }
    }

    pub fn is_dequeuer(&self, key: &Pubkey) -> bool {
        self.authorized_dequeuers.contains(key)
    }

    /// The configured consumer or any authorized dequeuer may drain fills
    pub fn is_authorized_consumer(&self, key: &Pubkey) -> bool {
        let is_consumer = self.fills_consumer != Pubkey::default() && self.fills_consumer == *key;
        is_consumer || self.is_dequeuer(key)
    }

    /// Insert a dequeuer. Returns false when it was already present.
    pub fn add_dequeuer(&mut self, dequeuer: Pubkey) -> Result<bool> {
        if self.is_dequeuer(&dequeuer) {
            return Ok(false);
        }
        require!(
            self.authorized_dequeuers.len() < MAX_AUTHORIZED_DEQUEUERS,
            SettlementError::MaxDequeuersReached
        );
        self.authorized_dequeuers.push(dequeuer);
        Ok(true)
    }

    /// Remove a dequeuer. Returns false when it was not present.
    pub fn remove_dequeuer(&mut self, dequeuer: &Pubkey) -> bool {
        let before = self.authorized_dequeuers.len();
        self.authorized_dequeuers.retain(|key| key != dequeuer);
        self.authorized_dequeuers.len() != before
    }
}

/// Tunable parameters supplied at initialization and on update
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigurationInput {
    pub oracle_pubkey: Pubkey,
    pub trade_size: u64,
    pub price_maximum_age: i64,
    pub coefficient: u64,
    pub min_discount_bps: u64,
    pub max_discount_bps: u64,
}

impl ConfigurationInput {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.max_discount_bps <= BPS_DENOMINATOR,
            SettlementError::InvalidMaxDiscountRate
        );
        require!(
            self.min_discount_bps <= self.max_discount_bps,
            SettlementError::InvalidMinDiscountRate
        );
        require!(
            self.coefficient <= MAX_COEFFICIENT,
            SettlementError::InvalidCoefficient
        );
        require!(self.trade_size > 0, SettlementError::InvalidTradeSize);
        require!(
            self.price_maximum_age > 0,
            SettlementError::InvalidPriceMaximumAge
        );
        Ok(())
    }
}

/// Inputs of the decaying discount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayParameters {
    pub coefficient: u64,
    pub min_discount_bps: u64,
    pub max_discount_bps: u64,
}
