use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, Standing, VoteCount, Voter};

/// Results of closing the vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyReport {
    pub tallied_at: DateTime<Utc>,
    pub total_votes: VoteCount,
    pub standings: Vec<Standing>,
    pub outcome: Outcome,
}

impl TallyReport {
    pub fn winner(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Winner(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.outcome, Outcome::Tie(_))
    }
}

/// One line of the voter roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterEntry {
    pub voter_id: String,
    pub name: String,
    pub voted_at: DateTime<Utc>,
}

impl From<&Voter> for VoterEntry {
    fn from(voter: &Voter) -> Self {
        Self {
            voter_id: voter.voter_id.to_string(),
            name: voter.name.clone(),
            voted_at: voter.voted_at,
        }
    }
}

/// Acknowledgement of an accepted ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter_id: String,
    pub candidate: String,
}
