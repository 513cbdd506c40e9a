use thiserror::Error;

use crate::domain::{InvalidVoterId, VoteCount};

/// Ledger operation refused while voting is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedAction {
    Register,
    Unregister,
    Vote,
}

impl ClosedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosedAction::Register => "register candidates",
            ClosedAction::Unregister => "unregister candidates",
            ClosedAction::Vote => "cast votes",
        }
    }
}

impl std::fmt::Display for ClosedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every expected rejection of a ledger operation. None of these are faults:
/// the caller reports them and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("Voting is closed. Cannot {0}.")]
    VotingClosed(ClosedAction),

    #[error("Invalid candidate name! Name cannot be empty.")]
    InvalidName,

    #[error("Candidate '{0}' is already registered!")]
    DuplicateCandidate(String),

    #[error("Candidate '{0}' not found!")]
    CandidateNotFound(String),

    #[error("Cannot unregister '{name}' with existing votes!")]
    HasVotes { name: String, votes: VoteCount },

    #[error("Invalid voter ID format! Must be V followed by numbers (e.g., V100).")]
    InvalidVoterIdFormat(String),

    #[error("Voter name cannot be empty!")]
    EmptyVoterName,

    #[error("Voter ID {0} has already voted!")]
    AlreadyVoted(String),

    #[error("Invalid candidate '{0}'!")]
    InvalidCandidate(String),
}

impl From<InvalidVoterId> for VoteError {
    fn from(err: InvalidVoterId) -> Self {
        VoteError::InvalidVoterIdFormat(err.0)
    }
}
