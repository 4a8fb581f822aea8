//! Shared helpers for unit tests

use anchor_lang::prelude::*;
use ed25519_dalek::{Signer as _, SigningKey};

use crate::error::SettlementError;
use crate::logic::PriceAttestation;

/// Assert that `result` failed with exactly `expected`
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: SettlementError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                e.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

pub fn oracle_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn oracle_pubkey(key: &SigningKey) -> Pubkey {
    Pubkey::new_from_array(key.verifying_key().to_bytes())
}

pub fn sign_attestation(key: &SigningKey, price: u64, timestamp: i64) -> PriceAttestation {
    let message = format!("{}|{}", price, timestamp);
    PriceAttestation {
        price,
        timestamp,
        signature: key.sign(message.as_bytes()).to_bytes().to_vec(),
    }
}
