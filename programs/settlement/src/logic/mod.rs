/// Settlement state machine. Every operation is a plain function over state
/// structs with `now` and the current tick passed in; nothing here reads a
/// sysvar or performs a CPI, so the whole machine runs natively under test.
pub mod attestation;    // Signed oracle price validation
pub mod pricing;        // Decaying ask price
pub mod trade;          // Trade orchestration
pub mod consumption;    // Authorized fills draining
pub mod governance;     // Guarded admin mutations
pub mod initialize;     // System bootstrap
pub mod migration;      // v1 <-> v2 layout transforms

pub use attestation::*;
pub use pricing::*;
pub use trade::*;
pub use consumption::*;
pub use governance::*;
pub use initialize::*;
pub use migration::*;
