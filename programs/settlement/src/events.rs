//! Event definitions
//!
//! Operations record their domain events into an [`EventLog`] instead of
//! emitting directly. Rejection events (bid too low, access while halted or
//! denied) are part of the log returned alongside an error, so the instruction
//! layer can still publish them.

use anchor_lang::prelude::borsh;
use anchor_lang::prelude::*;

/// Event emitted when a trade settles
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSettled {
    pub trader: Pubkey,
    pub bid_price: u64,
    pub ask_price: u64,
    pub native_amount: u64,
    pub token_amount: u64,
    pub tick: u64,
    pub ledger_count: u64,
    pub timestamp: i64,
}

/// Event emitted when a bid is rejected for being under the ask
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidTooLow {
    pub trader: Pubkey,
    pub bid_price: u64,
    pub ask_price: u64,
    pub native_amount: u64,
    pub timestamp: i64,
}

/// Event emitted when a trade is attempted while the system is halted
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDuringSystemHalt {
    pub accessed_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a denied trader attempts a trade
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessByDeniedTrader {
    pub accessed_by: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInitialized {
    pub admin: Pubkey,
    pub fills_registry: Pubkey,
    pub ledger_capacity: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminChanged {
    pub changed_by: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyListAuthoritySet {
    pub changed_by: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when an address is added to the deny list
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyListAddressAdded {
    pub added_by: Pubkey,
    pub address: Pubkey,
    pub update_count: u64,
    pub timestamp: i64,
}

/// Event emitted when an address is removed from the deny list
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyListAddressRemoved {
    pub removed_by: Pubkey,
    pub address: Pubkey,
    pub update_count: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DequeuerAdded {
    pub added_by: Pubkey,
    pub dequeuer: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DequeuerRemoved {
    pub removed_by: Pubkey,
    pub dequeuer: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillsConsumerChanged {
    pub changed_by: Pubkey,
    pub new_consumer: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemHalted {
    pub halted_by: Pubkey,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUnhalted {
    pub unhalted_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the tunable configuration is replaced
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationUpdated {
    pub changed_by: Pubkey,
    pub oracle_pubkey: Pubkey,
    pub trade_size: u64,
    pub price_maximum_age: i64,
    pub coefficient: u64,
    pub min_discount_bps: u64,
    pub max_discount_bps: u64,
    pub timestamp: i64,
}

/// Event emitted when fills are drained from the ledger
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillsConsumed {
    pub consumer: Pubkey,
    pub native_consumed: u64,
    pub token_consumed: u64,
    pub fills_fully_consumed: u64,
    pub timestamp: i64,
}

/// Event emitted when configuration and deny list move between layout versions
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMigrated {
    pub migrated_by: Pubkey,
    pub from_version: u8,
    pub to_version: u8,
    pub timestamp: i64,
}

macro_rules! settlement_events {
    ($($name:ident),* $(,)?) => {
        /// Every domain event the program can record
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SettlementEvent {
            $($name($name),)*
        }

        $(
            impl From<$name> for SettlementEvent {
                fn from(event: $name) -> Self {
                    SettlementEvent::$name(event)
                }
            }
        )*

        impl SettlementEvent {
            /// Write the event to the program log
            pub fn emit(self) {
                match self {
                    $(SettlementEvent::$name(event) => emit!(event),)*
                }
            }
        }
    };
}

settlement_events!(
    TradeSettled,
    BidTooLow,
    AccessDuringSystemHalt,
    AccessByDeniedTrader,
    SystemInitialized,
    AdminChanged,
    DenyListAuthoritySet,
    DenyListAddressAdded,
    DenyListAddressRemoved,
    DequeuerAdded,
    DequeuerRemoved,
    FillsConsumerChanged,
    SystemHalted,
    SystemUnhalted,
    ConfigurationUpdated,
    FillsConsumed,
    LayoutMigrated,
);

/// Ordered sink operations write their events into
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SettlementEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: impl Into<SettlementEvent>) {
        self.events.push(event.into());
    }

    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&SettlementEvent> {
        self.events.last()
    }

    /// Emit every recorded event in order
    pub fn emit_all(self) {
        for event in self.events {
            event.emit();
        }
    }
}
