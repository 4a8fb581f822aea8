/// Low-level helpers shared by the state machine and the instruction layer:
/// overflow-safe arithmetic and the CPI transfers a settled trade performs.
pub mod math_safe;            // Overflow-safe arithmetic traits
pub mod transfers;            // Token and native transfer CPIs

pub use math_safe::*;
pub use transfers::*;
