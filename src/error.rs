use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a user's intent and the ledger's
/// answer. Client-side validation failures never reach the network; all
/// backend-reported rejections are surfaced, never swallowed.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or malformed. Caught before any
    /// request is sent.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// A vote was attempted without a chosen candidate or election.
    /// Caught before any request is sent.
    #[error("No candidate selected")]
    IncompleteSelection,
    /// The ledger already holds a voter for this (student, election) pair.
    #[error("Voter is already registered for this election")]
    DuplicateRegistration,
    /// The ledger already holds an accepted ballot from this voter for
    /// this election.
    #[error("Voter has already cast a ballot in this election")]
    DuplicateVote,
    /// Transport-level failure. Callers render an empty view and allow a
    /// retry; nothing was committed.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    /// Business-rule rejection; the reason is the backend's own text.
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// The election is over; the only remaining view is the results page.
    #[error("Election has already ended")]
    ElectionEnded,
    /// This flow instance already has a submission outstanding.
    #[error("A submission is already in flight")]
    SubmissionInFlight,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::BackendUnavailable(err.to_string())
    }
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Classify a rejection reported by the backend. The ledger's own
    /// phrases identify the two conflict cases; anything else stays opaque
    /// and is surfaced verbatim.
    pub fn from_rejection(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let lowered = reason.to_lowercase();
        if lowered.contains("already voted") {
            Self::DuplicateVote
        } else if lowered.contains("already registered") {
            Self::DuplicateRegistration
        } else {
            Self::Rejected(reason)
        }
    }
}
