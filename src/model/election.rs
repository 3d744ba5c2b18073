use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::candidate::{Candidate, CandidateTally};
use super::phase::Phase;

/// An election as recorded on the ledger. Mutable only through admin
/// actions; the name is immutable after creation, while the end date may
/// be shortened by "end election now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    /// Ledger-assigned identifier, namespaced `election.<timestamp>`.
    #[serde(rename = "electionID")]
    pub election_id: String,
    pub election_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Election {
    /// The lifecycle phase at the given instant.
    pub fn phase_at(&self, now: DateTime<Utc>) -> Phase {
        Phase::resolve(now, self.start_date, self.end_date)
    }

    /// Start date in the local timezone, for display.
    pub fn start_local(&self) -> DateTime<Local> {
        self.start_date.with_timezone(&Local)
    }

    /// End date in the local timezone, for display.
    pub fn end_local(&self) -> DateTime<Local> {
        self.end_date.with_timezone(&Local)
    }
}

/// A new election ready for submission. The ledger assigns the identifier
/// and the bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElection {
    pub election_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl NewElection {
    /// Check the creation invariants: a name, and a window that starts
    /// before it ends.
    pub fn validate(&self) -> Result<()> {
        if self.election_name.trim().is_empty() {
            return Err(Error::validation("election name must not be empty"));
        }
        if self.start_date >= self.end_date {
            return Err(Error::validation("election must start before it ends"));
        }
        Ok(())
    }
}

/// Final standings of an election, ranked by votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionResults {
    pub election: Election,
    /// Candidates with their tallies for this election, highest first.
    pub standings: Vec<CandidateTally>,
    /// The unique top-scoring candidate. A tie, or an empty field, yields
    /// no winner.
    pub winner: Option<Candidate>,
}

impl ElectionResults {
    pub fn from_standings(election: Election, mut standings: Vec<CandidateTally>) -> Self {
        standings.sort_by(|a, b| b.votes.cmp(&a.votes));
        let winner = match standings.as_slice() {
            [] => None,
            [only] => Some(only.candidate.clone()),
            [first, second, ..] if first.votes > second.votes => Some(first.candidate.clone()),
            _ => None,
        };
        Self {
            election,
            standings,
            winner,
        }
    }
}
