use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::model::{Ballot, Credential, Election, Phase, VoteReceipt};

/// Where a voting session stands for one (voter, election) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoteState {
    /// No accepted ballot this session; casting is permitted.
    Unvoted,
    /// A ballot is on the wire. A flow left in this state (its cast future
    /// was dropped mid-request) refuses further submissions.
    Voting,
    /// A ballot was accepted; casting is refused for the rest of the
    /// session.
    Voted,
}

/// What a permitted `cast` resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// The ballot was accepted; the message is the backend's own text.
    Accepted(VoteReceipt),
    /// The election ended before the ballot could be sent. The caller
    /// redirects to the read-only results view; no ballot went out.
    ElectionOver,
}

/// The vote-casting protocol for one election: the single place where a
/// voter's intent becomes an irreversible state change.
///
/// A rejection returns the session to `Unvoted` so the voter may correct
/// and retry; an acceptance latches `Voted`. The latch is per-session
/// only — the ledger independently rejects duplicates from other sessions,
/// and that rejection is surfaced as `DuplicateVote` too.
pub struct VoteCastingProtocol<'a> {
    backend: &'a dyn Backend,
    election: Election,
    state: VoteState,
}

impl<'a> VoteCastingProtocol<'a> {
    /// Start a session against an already-fetched election record.
    pub fn new(backend: &'a dyn Backend, election: Election) -> Self {
        Self {
            backend,
            election,
            state: VoteState::Unvoted,
        }
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    /// The election record as last seen by this session.
    pub fn election(&self) -> &Election {
        &self.election
    }

    /// Re-fetch the election record, picking up an end date shortened
    /// since the last look.
    pub async fn refresh(&mut self) -> Result<&Election> {
        self.election = self.backend.election(&self.election.election_id).await?;
        Ok(&self.election)
    }

    /// Cast a ballot for `candidate_id` at `now`.
    ///
    /// Order of checks: session guard, selection completeness, phase
    /// against the cached record, phase against the freshest record. The
    /// first three touch no network; only after all of them does the
    /// ballot go out. Credential correctness is the backend's call.
    pub async fn cast(
        &mut self,
        credential: &Credential,
        candidate_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CastOutcome> {
        match self.state {
            VoteState::Voting => return Err(Error::SubmissionInFlight),
            VoteState::Voted => return Err(Error::DuplicateVote),
            VoteState::Unvoted => {}
        }
        if candidate_id.is_empty() || self.election.election_id.is_empty() {
            return Err(Error::IncompleteSelection);
        }
        if self.election.phase_at(now) == Phase::Ended {
            warn!(
                "Election {} already over; redirecting to results",
                self.election.election_id
            );
            return Ok(CastOutcome::ElectionOver);
        }

        self.state = VoteState::Voting;
        let outcome = self.submit(credential, candidate_id, now).await;
        self.state = match outcome {
            Ok(CastOutcome::Accepted(_)) => VoteState::Voted,
            _ => VoteState::Unvoted,
        };
        outcome
    }

    async fn submit(
        &mut self,
        credential: &Credential,
        candidate_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CastOutcome> {
        // Liveness re-check: an admin may have ended the election since
        // our last fetch. The ledger is authoritative, so re-resolve the
        // phase from the freshest end date before the ballot goes out.
        self.election = self.backend.election(&self.election.election_id).await?;
        if self.election.phase_at(now) == Phase::Ended {
            warn!(
                "Election {} ended mid-flow; redirecting to results",
                self.election.election_id
            );
            return Ok(CastOutcome::ElectionOver);
        }

        let ballot = Ballot::new(credential, candidate_id, &self.election.election_id);
        let receipt = self.backend.cast_ballot(&ballot).await?;
        info!(
            "Ballot accepted for election {}",
            self.election.election_id
        );
        Ok(CastOutcome::Accepted(receipt))
    }
}
