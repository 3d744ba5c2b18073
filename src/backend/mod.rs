use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Ballot, Candidate, Election, NewElection, VoteReceipt, Voter};

mod http;
#[cfg(test)]
pub(crate) mod stub;
mod wire;

pub use http::HttpBackend;
pub use wire::{ApiResponse, CandidateRequest, CreatedElection, FieldUpdate, Keyed, VoterRequest};

/// The REST collaborator that persists elections, candidates, voters and
/// votes. The client holds no authoritative state: everything fetched
/// through this trait is a cache, stale after any mutating call.
///
/// Workflows depend on `&dyn Backend` so tests can substitute an
/// in-memory implementation.
#[async_trait]
pub trait Backend: Sync {
    /// `GET /election` — every election on the ledger, in ledger order.
    async fn elections(&self) -> Result<Vec<Election>>;

    /// `GET /election/{id}` — the freshest record for one election.
    async fn election(&self, election_id: &str) -> Result<Election>;

    /// `POST /election` — returns the ledger-assigned identifier.
    async fn create_election(&self, spec: &NewElection) -> Result<String>;

    /// `PUT /election/{id}` — apply a single-field update. Returns the
    /// backend's informational message.
    async fn update_election(&self, election_id: &str, update: &FieldUpdate) -> Result<String>;

    /// `GET /candidate` — the global candidate pool.
    async fn candidates(&self) -> Result<Vec<Candidate>>;

    /// `GET /candidate/{electionID}` — candidates standing in one election.
    async fn candidates_for(&self, election_id: &str) -> Result<Vec<Candidate>>;

    /// `POST /candidate` — create a candidate or re-associate an existing
    /// one (same student ID) with the request's election.
    async fn create_candidate(&self, request: &CandidateRequest) -> Result<String>;

    /// `POST /voter` — register a voter for one election.
    async fn register_voter(&self, request: &VoterRequest) -> Result<String>;

    /// `GET /voters` — the full voter roll.
    async fn voters(&self) -> Result<Vec<Voter>>;

    /// `POST /ballot/vote` on the v2 API — cast a credential-checked
    /// ballot.
    async fn cast_ballot(&self, ballot: &Ballot) -> Result<VoteReceipt>;
}
