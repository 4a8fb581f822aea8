//! Price attestation validation
//!
//! The oracle signs `"{price}|{timestamp}"` with ed25519. A reading is accepted
//! when the signature verifies against the configured oracle key, the price
//! is positive and the timestamp is within `max_age` seconds of now in either
//! direction.

use anchor_lang::prelude::*;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use crate::constants::ED25519_SIGNATURE_LEN;
use crate::error::SettlementError;

/// Signed price message as submitted by a trader
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PriceAttestation {
    /// Token base units per `UNIT` native units
    pub price: u64,
    /// Unix timestamp the oracle observed the price at
    pub timestamp: i64,
    /// ed25519 signature over [`PriceAttestation::message`]
    pub signature: Vec<u8>,
}

impl PriceAttestation {
    /// Exact bytes the oracle signs. A negative price rendered by the signer
    /// can never equal this `u64` rendering, so it fails verification.
    pub fn message(&self) -> String {
        format!("{}|{}", self.price, self.timestamp)
    }
}

/// Authenticated, fresh oracle price
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleReading {
    pub price: u64,
    pub timestamp: i64,
}

pub fn validate_attestation(
    attestation: &PriceAttestation,
    oracle_pubkey: &Pubkey,
    max_age: i64,
    now: i64,
) -> Result<OracleReading> {
    verify_signature(attestation, oracle_pubkey)?;

    require!(attestation.price > 0, SettlementError::InvalidOracleSwapRate);

    let age = (now as i128) - (attestation.timestamp as i128);
    if age.unsigned_abs() > max_age.max(0) as u128 {
        msg!(
            "Stale attestation: timestamp {} is {}s from now {}, max age {}s",
            attestation.timestamp,
            age,
            now,
            max_age
        );
        return err!(SettlementError::StalePrice);
    }

    Ok(OracleReading {
        price: attestation.price,
        timestamp: attestation.timestamp,
    })
}

fn verify_signature(attestation: &PriceAttestation, oracle_pubkey: &Pubkey) -> Result<()> {
    let key = VerifyingKey::from_bytes(&oracle_pubkey.to_bytes())
        .map_err(|_| error!(SettlementError::InvalidOraclePublicKey))?;

    if attestation.signature.len() != ED25519_SIGNATURE_LEN {
        msg!("Attestation signature has length {}", attestation.signature.len());
        return err!(SettlementError::AttestationNotAuthentic);
    }
    let mut bytes = [0u8; ED25519_SIGNATURE_LEN];
    bytes.copy_from_slice(&attestation.signature);
    let signature = Signature::from_bytes(&bytes);

    key.verify(attestation.message().as_bytes(), &signature)
        .map_err(|_| error!(SettlementError::AttestationNotAuthentic))
}
