use serde::{Deserialize, Serialize};

/// Number of votes recorded for a candidate.
pub type VoteCount = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub votes: VoteCount,
}

impl Candidate {
    /// Create a candidate with no votes. The caller is responsible for
    /// passing an already normalized name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            votes: 0,
        }
    }

    pub fn record_vote(&mut self) {
        self.votes += 1;
    }

    pub fn has_votes(&self) -> bool {
        self.votes > 0
    }
}

/// Normalize a raw candidate or voter name.
/// Returns `None` when nothing is left after trimming.
pub fn normalize_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
