use serde::Serialize;

/// The voter's credential for the v2 ballot API. The client never checks
/// it locally; correctness is the backend's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// A single vote-cast request: the voter's credential plus their choice.
/// Built immediately before submission and dropped afterwards; never
/// persisted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ballot {
    pub email: String,
    pub password: String,
    #[serde(rename = "candidateID")]
    pub candidate_id: String,
    #[serde(rename = "electionID")]
    pub election_id: String,
}

impl Ballot {
    pub fn new(credential: &Credential, candidate_id: &str, election_id: &str) -> Self {
        Self {
            email: credential.email.clone(),
            password: credential.password.clone(),
            candidate_id: candidate_id.to_string(),
            election_id: election_id.to_string(),
        }
    }
}

/// Confirmation of an accepted ballot, carrying the backend's
/// informational message for the voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub message: String,
}
