use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{
    build_integrity_report, decide_outcome, normalize_name, rank, total_votes, Candidate,
    IntegrityReport, Voter, VoterId, VoteCount,
};

use super::{ClosedAction, TallyReport, VoteError, VoteReceipt, VoterEntry};

/// The voting ledger: owns every candidate and voter and enforces the
/// voting rules. This is the only interface clients (the menu, tests) use.
///
/// The ledger does no I/O. Every rejected request comes back as a
/// [`VoteError`] and leaves the state untouched.
#[derive(Debug)]
pub struct VotingLedger {
    /// Registration order is the display order.
    candidates: Vec<Candidate>,
    voters: HashMap<VoterId, Voter>,
    voting_active: bool,
}

impl Default for VotingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingLedger {
    /// Create an empty ledger with voting open.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            voters: HashMap::new(),
            voting_active: true,
        }
    }

    pub fn is_voting_active(&self) -> bool {
        self.voting_active
    }

    fn ensure_open(&self, action: ClosedAction) -> Result<(), VoteError> {
        if self.voting_active {
            Ok(())
        } else {
            debug!(%action, "rejected: voting closed");
            Err(VoteError::VotingClosed(action))
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.name == name)
    }

    // ========================
    // Candidate operations
    // ========================

    /// Register a candidate. Returns the stored (trimmed) name.
    pub fn register_candidate(&mut self, name: &str) -> Result<String, VoteError> {
        self.ensure_open(ClosedAction::Register)?;

        let name = normalize_name(name).ok_or(VoteError::InvalidName)?;
        if self.position(name).is_some() {
            debug!(candidate = name, "rejected: duplicate candidate");
            return Err(VoteError::DuplicateCandidate(name.to_string()));
        }

        self.candidates.push(Candidate::new(name));
        info!(candidate = name, "candidate registered");
        Ok(name.to_string())
    }

    /// Remove a candidate that has not received any votes.
    pub fn unregister_candidate(&mut self, name: &str) -> Result<Candidate, VoteError> {
        self.ensure_open(ClosedAction::Unregister)?;

        let name = name.trim();
        let index = self
            .position(name)
            .ok_or_else(|| VoteError::CandidateNotFound(name.to_string()))?;

        let candidate = &self.candidates[index];
        if candidate.has_votes() {
            debug!(candidate = name, votes = candidate.votes, "rejected: candidate has votes");
            return Err(VoteError::HasVotes {
                name: name.to_string(),
                votes: candidate.votes,
            });
        }

        let removed = self.candidates.remove(index);
        info!(candidate = name, "candidate unregistered");
        Ok(removed)
    }

    /// Candidate names in registration order.
    pub fn list_candidates(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.name.clone()).collect()
    }

    /// Candidates with their current counts, in registration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    // ========================
    // Voting
    // ========================

    /// Record one ballot.
    ///
    /// Checks run in a fixed order: voting open, voter id format, voter
    /// name, duplicate voter, candidate. The first failing check decides
    /// the error.
    pub fn cast_vote(
        &mut self,
        voter_id: &str,
        voter_name: &str,
        candidate_name: &str,
    ) -> Result<VoteReceipt, VoteError> {
        self.ensure_open(ClosedAction::Vote)?;

        let voter_id = VoterId::parse(voter_id).inspect_err(|err| {
            debug!(voter_id = %err.0, "rejected: bad voter id");
        })?;

        let voter_name = normalize_name(voter_name).ok_or(VoteError::EmptyVoterName)?;

        if self.voters.contains_key(&voter_id) {
            debug!(%voter_id, "rejected: already voted");
            return Err(VoteError::AlreadyVoted(voter_id.to_string()));
        }

        let candidate_name = candidate_name.trim();
        let index = self.position(candidate_name).ok_or_else(|| {
            debug!(candidate = candidate_name, "rejected: unknown candidate");
            VoteError::InvalidCandidate(candidate_name.to_string())
        })?;

        self.candidates[index].record_vote();
        self.voters.insert(
            voter_id.clone(),
            Voter::new(voter_id.clone(), voter_name.to_string()),
        );
        info!(%voter_id, candidate = candidate_name, "vote cast");

        Ok(VoteReceipt {
            voter_id: voter_id.to_string(),
            candidate: candidate_name.to_string(),
        })
    }

    /// Total votes across registered candidates.
    pub fn total_votes(&self) -> VoteCount {
        total_votes(&self.candidates)
    }

    // ========================
    // Results
    // ========================

    /// Close voting and compute the results.
    ///
    /// Returns `None` when no candidate is registered; in that case voting
    /// stays open. Otherwise voting is closed even if nobody voted.
    pub fn tally(&mut self) -> Option<TallyReport> {
        if self.candidates.is_empty() {
            debug!("tally requested with no candidates");
            return None;
        }

        if self.voting_active {
            info!("voting closed");
        }
        self.voting_active = false;

        // Ranking and the tie scan must run on the same sorted sequence.
        let standings = rank(&self.candidates);
        let outcome = decide_outcome(&standings);
        let report = TallyReport {
            tallied_at: Utc::now(),
            total_votes: self.total_votes(),
            standings,
            outcome,
        };

        info!(total_votes = report.total_votes, outcome = ?report.outcome, "results tallied");
        Some(report)
    }

    /// All voters sorted by voter id (string order, so `V100` < `V99`).
    pub fn voter_roster(&self) -> Vec<VoterEntry> {
        let mut voters: Vec<&Voter> = self.voters.values().collect();
        voters.sort_by(|a, b| a.voter_id.cmp(&b.voter_id));
        voters.into_iter().map(VoterEntry::from).collect()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Verify the vote counters agree with the voter records.
    pub fn check_integrity(&self) -> IntegrityReport {
        build_integrity_report(&self.candidates, self.voters.len())
    }

    /// Clear all candidates and voters and reopen voting.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.voters.clear();
        self.voting_active = true;
        info!("voting system reset");
    }
}
