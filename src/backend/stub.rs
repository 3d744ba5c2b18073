//! In-memory stand-in for the REST service, reproducing the ledger's
//! observable semantics: duplicate-voter rejection, has-voted flagging,
//! candidate re-association, end-date patching. Every request is recorded
//! so tests can assert on the traffic a workflow produced.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{
    Ballot, Candidate, Election, NewElection, TallyEntry, VoteReceipt, Voter, CANDIDATE_PREFIX,
};

use super::wire::{CandidateRequest, FieldUpdate, VoterRequest};
use super::Backend;

/// One request received by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Elections,
    Election(String),
    CreateElection(String),
    UpdateElection(String),
    Candidates,
    CandidatesFor(String),
    CreateCandidate(String),
    RegisterVoter(String),
    Voters,
    CastBallot(String),
}

#[derive(Default)]
struct State {
    elections: Vec<Election>,
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
    /// email -> (password, studentID), mirroring the credential store the
    /// v2 ballot endpoint checks against.
    credentials: HashMap<String, (String, String)>,
    calls: Vec<Call>,
    offline: bool,
    next_id: u32,
}

pub struct StubBackend {
    state: Mutex<State>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_elections(elections: Vec<Election>) -> Self {
        let stub = Self::new();
        stub.lock().elections = elections;
        stub
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Pretend the service is unreachable: every call fails with
    /// `BackendUnavailable` and nothing is recorded.
    pub fn set_offline(&self) {
        self.lock().offline = true;
    }

    pub fn add_election(&self, election: Election) {
        self.lock().elections.push(election);
    }

    pub fn add_candidate(&self, candidate: Candidate) {
        self.lock().candidates.push(candidate);
    }

    pub fn add_voter(&self, voter: Voter) {
        self.lock().voters.push(voter);
    }

    /// Register a credential for the v2 ballot check.
    pub fn add_credential(&self, email: &str, password: &str, student_id: &str) {
        self.lock().credentials.insert(
            email.to_string(),
            (password.to_string(), student_id.to_string()),
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of ballots that actually reached the service.
    pub fn ballot_posts(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::CastBallot(_)))
            .count()
    }

    pub fn candidates_snapshot(&self) -> Vec<Candidate> {
        self.lock().candidates.clone()
    }

    pub fn voters_snapshot(&self) -> Vec<Voter> {
        self.lock().voters.clone()
    }

    /// Shorten an election's end date behind the client's back, as an
    /// admin in another session would.
    pub fn end_election(&self, election_id: &str, at: DateTime<Utc>) {
        let mut state = self.lock();
        let election = state
            .elections
            .iter_mut()
            .find(|e| e.election_id == election_id)
            .expect("unknown election in stub");
        election.end_date = at;
        election.updated_at = at;
    }

    fn guard(state: &MutexGuard<'_, State>) -> Result<()> {
        if state.offline {
            return Err(Error::BackendUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn elections(&self) -> Result<Vec<Election>> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state.calls.push(Call::Elections);
        Ok(state.elections.clone())
    }

    async fn election(&self, election_id: &str) -> Result<Election> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state.calls.push(Call::Election(election_id.to_string()));
        state
            .elections
            .iter()
            .find(|e| e.election_id == election_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("election '{election_id}'")))
    }

    async fn create_election(&self, spec: &NewElection) -> Result<String> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::CreateElection(spec.election_name.clone()));
        if spec.start_date > spec.end_date {
            return Err(Error::from_rejection("Invalid election dates"));
        }
        state.next_id += 1;
        let election_id = format!("election.{}", 1_680_000_000 + state.next_id);
        let now = Utc::now();
        state.elections.push(Election {
            election_id: election_id.clone(),
            election_name: spec.election_name.clone(),
            start_date: spec.start_date,
            end_date: spec.end_date,
            created_at: now,
            updated_at: now,
        });
        Ok(election_id)
    }

    async fn update_election(&self, election_id: &str, update: &FieldUpdate) -> Result<String> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::UpdateElection(election_id.to_string()));
        if update.target != "endDate" {
            return Err(Error::from_rejection(format!(
                "Unknown update target '{}'",
                update.target
            )));
        }
        let value = DateTime::parse_from_rfc3339(&update.value)
            .map_err(|_| Error::from_rejection("Invalid election dates"))?
            .with_timezone(&Utc);
        let election = state
            .elections
            .iter_mut()
            .find(|e| e.election_id == election_id)
            .ok_or_else(|| Error::not_found(format!("election '{election_id}'")))?;
        election.end_date = value;
        election.updated_at = value;
        Ok("Election updated. Txn committed successfully.".to_string())
    }

    async fn candidates(&self) -> Result<Vec<Candidate>> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state.calls.push(Call::Candidates);
        Ok(state.candidates.clone())
    }

    async fn candidates_for(&self, election_id: &str) -> Result<Vec<Candidate>> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::CandidatesFor(election_id.to_string()));
        Ok(state
            .candidates
            .iter()
            .filter(|c| c.stands_in(election_id))
            .cloned()
            .collect())
    }

    async fn create_candidate(&self, request: &CandidateRequest) -> Result<String> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::CreateCandidate(request.student_id.clone()));
        let ledger_id = format!("{CANDIDATE_PREFIX}{}", request.student_id);
        let election_id = request.election_id.clone();
        let existing = state
            .candidates
            .iter()
            .position(|c| c.student_id == ledger_id);
        if let Some(index) = existing {
            let candidate = &mut state.candidates[index];
            if candidate.stands_in(&election_id) {
                return Err(Error::from_rejection(
                    "Candidate already added to this election",
                ));
            }
            candidate.elections.push(TallyEntry {
                election_id,
                votes: 0,
            });
        } else {
            state.candidates.push(Candidate {
                name: request.name.clone(),
                student_id: ledger_id,
                faculty: request.faculty.clone(),
                party: request.party.clone(),
                avatar: request.avatar.clone(),
                elections: vec![TallyEntry {
                    election_id,
                    votes: 0,
                }],
            });
        }
        Ok("Candidate created. Txn committed successfully.".to_string())
    }

    async fn register_voter(&self, request: &VoterRequest) -> Result<String> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::RegisterVoter(request.student_id.clone()));
        let duplicate = state.voters.iter().any(|v| {
            v.student_id == request.student_id && v.election_id == request.election_id
        });
        if duplicate {
            return Err(Error::from_rejection("Voter already registered"));
        }
        state.voters.push(Voter {
            student_id: request.student_id.clone(),
            email: request.email.clone(),
            election_id: request.election_id.clone(),
            has_voted: false,
        });
        Ok("Voter created. Txn committed successfully.".to_string())
    }

    async fn voters(&self) -> Result<Vec<Voter>> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state.calls.push(Call::Voters);
        Ok(state.voters.clone())
    }

    async fn cast_ballot(&self, ballot: &Ballot) -> Result<VoteReceipt> {
        let mut state = self.lock();
        Self::guard(&state)?;
        state
            .calls
            .push(Call::CastBallot(ballot.candidate_id.clone()));

        let student_id = match state.credentials.get(&ballot.email) {
            Some((password, student_id)) if *password == ballot.password => student_id.clone(),
            _ => return Err(Error::from_rejection("Wrong email or password.")),
        };

        let election_id = ballot.election_id.clone();
        let voter = state
            .voters
            .iter_mut()
            .find(|v| v.student_id == student_id && v.election_id == election_id)
            .ok_or_else(|| Error::from_rejection(format!("Failed to get voter: {student_id}")))?;
        if voter.has_voted {
            return Err(Error::from_rejection("Voter has already voted"));
        }
        voter.has_voted = true;

        let candidate_id = ballot.candidate_id.clone();
        let tally = state
            .candidates
            .iter_mut()
            .find(|c| c.student_id == candidate_id)
            .and_then(|c| {
                c.elections
                    .iter_mut()
                    .find(|entry| entry.election_id == election_id)
            })
            .ok_or_else(|| {
                Error::from_rejection(format!("Failed to get candidate: {candidate_id}"))
            })?;
        tally.votes += 1;

        Ok(VoteReceipt {
            message: "Vote casted. Txn committed successfully.".to_string(),
        })
    }
}
