// Application layer: the voting ledger and the types it hands to clients.

pub mod error;
mod reporting;
mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
