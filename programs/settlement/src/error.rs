//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum SettlementError {
    // Attestation errors
    #[msg("Price attestation signature is not authentic")]
    AttestationNotAuthentic,

    #[msg("Oracle public key is not a valid ed25519 key")]
    InvalidOraclePublicKey,

    #[msg("Oracle price must be greater than zero")]
    InvalidOracleSwapRate,

    #[msg("Price attestation is stale or future-dated")]
    StalePrice,

    // Trade admission errors
    #[msg("System is halted")]
    SystemHalted,

    #[msg("Trader is on the deny list")]
    DeniedTrader,

    #[msg("Only one trade per tick is allowed")]
    OneTradePerTick,

    #[msg("Current tick precedes the last trade tick")]
    InvalidTradeTick,

    #[msg("Bid is below the current ask price")]
    BidTooLow,

    // Fills ledger errors
    #[msg("Fills ledger is full")]
    LedgerFull,

    #[msg("Fills ledger is empty")]
    EmptyLedger,

    #[msg("Consumption budget must be greater than zero")]
    InvalidBudget,

    #[msg("Ledger capacity must be between 1 and the maximum fills capacity")]
    InvalidLedgerCapacity,

    #[msg("Fills ledger header does not match its slot window")]
    CorruptLedger,

    #[msg("Fills registry does not belong to this engine")]
    InvalidFillsRegistry,

    #[msg("Caller is not authorized to consume fills")]
    UnauthorizedFillConsumer,

    // Governance errors
    #[msg("Signer is not the admin")]
    UnauthorizedAdmin,

    #[msg("Signer is not the deny list authority")]
    UnauthorizedDenyListAuthority,

    #[msg("Address is already on the deny list")]
    AlreadyDenied,

    #[msg("Address is not on the deny list")]
    NotInDenyList,

    #[msg("Deny list is full")]
    DenyListFull,

    #[msg("Maximum number of authorized dequeuers reached")]
    MaxDequeuersReached,

    #[msg("System is already in the requested state")]
    InvalidSystemState,

    // Configuration errors
    #[msg("Minimum discount must not exceed maximum discount")]
    InvalidMinDiscountRate,

    #[msg("Maximum discount must not exceed 10000 basis points")]
    InvalidMaxDiscountRate,

    #[msg("Decay coefficient exceeds the allowed maximum")]
    InvalidCoefficient,

    #[msg("Trade size must be greater than zero")]
    InvalidTradeSize,

    #[msg("Price maximum age must be greater than zero")]
    InvalidPriceMaximumAge,

    // Token errors
    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Invalid token treasury")]
    InvalidTreasury,

    // Math errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
