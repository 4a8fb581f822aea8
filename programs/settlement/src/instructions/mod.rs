/// Instruction layer. Each handler reads the clock, runs the matching
/// state machine operation, publishes the recorded events and performs any
/// asset transfers the operation settled on.

// Setup
pub mod initialize_system;  // Create every program account

// Trading
pub mod execute_trade;      // Settle one trade at the decayed ask
pub mod calculate_ask_price; // Read-only ask query

// Fills
pub mod consume_fills;      // Drain fills up to a native budget

// Governance
pub mod admin;              // Admin identity, halt flag, configuration, consumers
pub mod update_deny_list;   // Deny list edits

// Storage
pub mod migrate_layout;     // v1 <-> v2 account layouts

pub use initialize_system::*;
pub use execute_trade::*;
pub use calculate_ask_price::*;
pub use consume_fills::*;
pub use admin::*;
pub use update_deny_list::*;
pub use migrate_layout::*;
