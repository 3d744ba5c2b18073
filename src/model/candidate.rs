use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Namespace prefix the ledger puts on candidate student IDs.
pub(crate) const CANDIDATE_PREFIX: &str = "candidate.";

/// A candidate as recorded on the ledger. One record may stand in many
/// elections; re-associating an existing candidate with a new election
/// adds a tally entry instead of duplicating the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    /// Namespaced `candidate.<studentID>`; unique across the pool.
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub faculty: String,
    pub party: String,
    /// URL of the candidate's picture.
    pub avatar: String,
    /// Per-election tallies, one entry per election this candidate stands
    /// in.
    #[serde(default)]
    pub elections: Vec<TallyEntry>,
}

/// A candidate's vote count in one election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    #[serde(rename = "electionID")]
    pub election_id: String,
    pub votes: u64,
}

impl Candidate {
    /// Whether this candidate stands in the given election.
    pub fn stands_in(&self, election_id: &str) -> bool {
        self.elections
            .iter()
            .any(|entry| entry.election_id == election_id)
    }

    /// The tally for one election; zero if the candidate does not stand in
    /// it.
    pub fn tally_for(&self, election_id: &str) -> u64 {
        self.elections
            .iter()
            .find(|entry| entry.election_id == election_id)
            .map(|entry| entry.votes)
            .unwrap_or(0)
    }

    /// Student ID with the `candidate.` namespace prefix stripped.
    pub fn bare_student_id(&self) -> &str {
        self.student_id
            .strip_prefix(CANDIDATE_PREFIX)
            .unwrap_or(&self.student_id)
    }
}

/// A candidate paired with their tally in one particular election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
    pub candidate: Candidate,
    pub votes: u64,
}

/// Data collected by the add-candidate form. `student_id` is the bare ID;
/// the ledger applies the namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateForm {
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub party: String,
    pub avatar: String,
}

impl CandidateForm {
    /// Check that every required field is filled. The avatar is optional.
    pub fn validate(&self) -> Result<()> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.student_id, "student ID"),
            (&self.faculty, "faculty"),
            (&self.party, "party"),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// How the admin fills the add-candidate form: from scratch, or by reusing
/// a record from the global pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CandidateSelection {
    New,
    /// Index into the global pool listing.
    Reuse(usize),
}
