//! Decoding: the resumable scanner (§4.1), the plan engine it feeds (§4.5),
//! and the driver that pulls bytes from a `Read` source between the two.

pub mod driver;
pub mod plan;
pub mod plans;
pub mod scanner;
pub mod token;

pub use driver::Driver;
pub use plan::{Decode, Plan, PlanError, PlanStep};
pub use scanner::{ScanError, Scanner};
pub use token::{Sign, Token};
