//! Global constants for the settlement program
//!
//! Centralized constants for PDA seeds, units and capacity limits

use solana_program::native_token::LAMPORTS_PER_SOL;

// PDA seed constants (v1 layout)
pub const CONFIGURATION_REGISTRY_SEED: &[u8] = b"system_config_v1";
pub const ENGINE_STATE_SEED: &[u8] = b"state_v1";
pub const DENY_LIST_REGISTRY_SEED: &[u8] = b"deny_list_v1";
pub const NATIVE_VAULT_SEED: &[u8] = b"native_vault";

// PDA seed constants (v2 layout)
pub const CONFIGURATION_REGISTRY_V2_SEED: &[u8] = b"system_config_v2";
pub const DENY_LIST_REGISTRY_V2_SEED: &[u8] = b"deny_list_v2";

// Units
/// Native units per whole native asset; ask prices are quoted in token base units per `UNIT`
pub const UNIT: u64 = LAMPORTS_PER_SOL;

// Discount constants
/// Discount bounds are expressed in basis points
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Resolution the decaying discount is carried at (1e-8)
pub const DISCOUNT_SCALE: u64 = 100_000_000;
/// Scales a basis-point value into `DISCOUNT_SCALE` units
pub const BPS_TO_DISCOUNT_SCALE: u64 = DISCOUNT_SCALE / BPS_DENOMINATOR;
/// Coefficient ceiling: a full 100% discount per tick
pub const MAX_COEFFICIENT: u64 = 100_000_000;

// Capacity limits
pub const MAX_DENY_LIST_SIZE: usize = 310;
pub const MAX_AUTHORIZED_DEQUEUERS: usize = 20;
pub const MAX_FILLS_CAPACITY: usize = 650_000;

// Attestation
pub const ED25519_SIGNATURE_LEN: usize = 64;
