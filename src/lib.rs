//! In-memory voting ledger with an interactive command-line menu.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;

pub use application::{VoteError, VotingLedger};
pub use domain::*;
