use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Candidate, VoteCount};

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub votes: VoteCount,
    pub percentage: f64,
}

/// Result of an election once the standings are ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "candidates", rename_all = "snake_case")]
pub enum Outcome {
    /// Nobody voted, so nobody is declared.
    NoVotes,
    Winner(String),
    /// Every candidate sharing the top count, in ranking order.
    Tie(Vec<String>),
}

/// Sum of votes across candidates.
pub fn total_votes(candidates: &[Candidate]) -> VoteCount {
    candidates.iter().map(|c| c.votes).sum()
}

/// Share of the total, in percent. Zero when nothing was cast.
pub fn percentage(votes: VoteCount, total: VoteCount) -> f64 {
    if total > 0 {
        votes as f64 * 100.0 / total as f64
    } else {
        0.0
    }
}

/// Orders two candidates by vote count only, highest first.
/// Names never participate, so equal counts compare as `Equal`.
pub fn by_votes_descending(a: &Candidate, b: &Candidate) -> Ordering {
    b.votes.cmp(&a.votes)
}

/// Rank candidates by votes, highest first.
///
/// The sort is stable: candidates with the same count keep the order in
/// which they appear in `candidates` (registration order). The tie scan in
/// [`decide_outcome`] depends on this.
pub fn rank(candidates: &[Candidate]) -> Vec<Standing> {
    let total = total_votes(candidates);
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| by_votes_descending(a, b));

    ranked
        .into_iter()
        .map(|c| Standing {
            name: c.name.clone(),
            votes: c.votes,
            percentage: percentage(c.votes, total),
        })
        .collect()
}

/// Decide the winner from standings already produced by [`rank`].
///
/// Scans from the top while the count matches the leader's and stops at
/// the first different count. Only valid on a descending sequence.
pub fn decide_outcome(ranked: &[Standing]) -> Outcome {
    let total: VoteCount = ranked.iter().map(|s| s.votes).sum();
    let Some(leader) = ranked.first() else {
        return Outcome::NoVotes;
    };
    if total == 0 {
        return Outcome::NoVotes;
    }

    let max_votes = leader.votes;
    let mut leaders = Vec::new();
    for standing in ranked {
        if standing.votes != max_votes {
            break;
        }
        leaders.push(standing.name.clone());
    }

    if leaders.len() == 1 {
        Outcome::Winner(leaders.remove(0))
    } else {
        Outcome::Tie(leaders)
    }
}

/// Consistency check of the ledger counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub candidate_count: usize,
    pub voter_count: usize,
    pub vote_total: VoteCount,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Every recorded voter must account for exactly one vote, and candidate
/// names must be unique and non-empty.
pub fn build_integrity_report(candidates: &[Candidate], voter_count: usize) -> IntegrityReport {
    let vote_total = total_votes(candidates);
    let mut issues = Vec::new();

    if vote_total != voter_count as VoteCount {
        issues.push(format!(
            "vote total {} does not match voter count {}",
            vote_total, voter_count
        ));
    }

    let mut seen = HashSet::new();
    for candidate in candidates {
        if candidate.name.trim().is_empty() {
            issues.push("candidate with empty name".to_string());
        } else if candidate.name.trim() != candidate.name {
            issues.push(format!("candidate name '{}' is not trimmed", candidate.name));
        }
        if !seen.insert(candidate.name.as_str()) {
            issues.push(format!("duplicate candidate '{}'", candidate.name));
        }
    }

    IntegrityReport {
        candidate_count: candidates.len(),
        voter_count,
        vote_total,
        issues,
    }
}
