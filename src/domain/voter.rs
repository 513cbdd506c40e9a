use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Minimum number of digits following the `V` prefix.
pub const MIN_VOTER_ID_DIGITS: usize = 3;

/// A validated voter identifier: `V` followed by three or more decimal digits.
///
/// Ordering is plain string ordering on the whole identifier, so `V100`
/// sorts before `V99`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VoterId(String);

impl VoterId {
    /// Parse a raw identifier. The input is taken verbatim, surrounding
    /// whitespace makes it invalid.
    pub fn parse(raw: &str) -> Result<Self, InvalidVoterId> {
        if is_valid_voter_id(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidVoterId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `raw` is `V` followed by at least three ASCII digits.
pub fn is_valid_voter_id(raw: &str) -> bool {
    match raw.strip_prefix('V') {
        Some(digits) => {
            digits.len() >= MIN_VOTER_ID_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVoterId(pub String);

impl fmt::Display for InvalidVoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid voter id '{}'", self.0)
    }
}

impl std::error::Error for InvalidVoterId {}

/// A voter who has cast a ballot.
///
/// Identity is the voter id alone: two records with the same id and
/// different names are the same voter.
#[derive(Debug, Clone, Serialize)]
pub struct Voter {
    pub voter_id: VoterId,
    pub name: String,
    pub voted_at: DateTime<Utc>,
}

impl Voter {
    pub fn new(voter_id: VoterId, name: String) -> Self {
        Self {
            voter_id,
            name,
            voted_at: Utc::now(),
        }
    }
}

impl PartialEq for Voter {
    fn eq(&self, other: &Self) -> bool {
        self.voter_id == other.voter_id
    }
}

impl Eq for Voter {}

impl Hash for Voter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.voter_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_valid_voter_ids() {
        for raw in ["V100", "V000", "V12345", "V999999999999"] {
            assert!(VoterId::parse(raw).is_ok(), "{raw} should be valid");
        }
    }

    #[test]
    fn test_invalid_voter_ids() {
        for raw in ["V12", "X100", "V1a2", "v100", "V", "", " V100", "V100 ", "V１２３"] {
            assert!(VoterId::parse(raw).is_err(), "{raw:?} should be invalid");
        }
    }

    #[test]
    fn test_voter_ids_order_lexicographically() {
        let v100 = VoterId::parse("V100").unwrap();
        let v999 = VoterId::parse("V999").unwrap();
        let v1000 = VoterId::parse("V1000").unwrap();

        assert!(v100 < v999);
        assert!(v1000 < v999);
        assert!(v100 < v1000);
    }

    #[test]
    fn test_voter_identity_ignores_name() {
        let id = VoterId::parse("V100").unwrap();
        let first = Voter::new(id.clone(), "Ann".into());
        let second = Voter::new(id, "Someone Else".into());

        assert_eq!(first, second);

        let mut set = HashSet::new();
        assert!(set.insert(first));
        assert!(!set.insert(second));
    }
}
