use serde::{Deserialize, Serialize};

/// A registered voting identity, scoped to one election. Registering the
/// same student for the same election twice is a ledger-side conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub email: String,
    #[serde(rename = "electionID")]
    pub election_id: String,
    /// Set once an accepted ballot exists for this voter.
    #[serde(rename = "hasVoted", default)]
    pub has_voted: bool,
}

impl Voter {
    /// Derived identifier, unique per (student, election) pair.
    pub fn id(&self) -> String {
        format!("voter.{}.{}", self.student_id, self.election_id)
    }
}
