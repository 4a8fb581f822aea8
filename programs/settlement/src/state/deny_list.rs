//! Deny list registry
//!
//! Bounded set of addresses barred from trading. Every edit bumps the update
//! counter and stamps the edit time.

use anchor_lang::prelude::*;
use crate::constants::MAX_DENY_LIST_SIZE;
use crate::error::SettlementError;
use crate::utils::SafeMath;

/// Deny list account (PDA: `[DENY_LIST_REGISTRY_SEED]`)
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DenyListRegistry {
    pub denied_addresses: Vec<Pubkey>,
    /// Unix timestamp of the last edit
    pub last_updated: i64,
    /// Number of edits applied since initialization
    pub update_count: u64,
}

impl DenyListRegistry {
    pub const LEN: usize = 8 + // discriminator
        4 + (32 * MAX_DENY_LIST_SIZE) + // denied_addresses
        8 + // last_updated
        8; // update_count

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.denied_addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.denied_addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denied_addresses.is_empty()
    }

    pub fn insert(&mut self, address: Pubkey, now: i64) -> Result<()> {
        require!(!self.contains(&address), SettlementError::AlreadyDenied);
        require!(
            self.denied_addresses.len() < MAX_DENY_LIST_SIZE,
            SettlementError::DenyListFull
        );
        let update_count = self.update_count.safe_add(1)?;
        self.denied_addresses.push(address);
        self.touch(update_count, now);
        Ok(())
    }

    pub fn remove(&mut self, address: &Pubkey, now: i64) -> Result<()> {
        let position = self
            .denied_addresses
            .iter()
            .position(|denied| denied == address)
            .ok_or(SettlementError::NotInDenyList)?;
        let update_count = self.update_count.safe_add(1)?;
        self.denied_addresses.swap_remove(position);
        self.touch(update_count, now);
        Ok(())
    }

    fn touch(&mut self, update_count: u64, now: i64) {
        self.update_count = update_count;
        self.last_updated = now;
    }
}
