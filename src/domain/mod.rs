mod candidate;
mod tally;
mod voter;

pub use candidate::*;
pub use tally::*;
pub use voter::*;
