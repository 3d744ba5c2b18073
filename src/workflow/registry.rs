use log::info;

use crate::backend::{Backend, CandidateRequest};
use crate::error::Result;
use crate::model::{
    Candidate, CandidateForm, CandidateSelection, CandidateTally, Election, ElectionResults,
};

/// Candidate operations: the per-election listing with tallies, the global
/// pool used to pre-fill the add-candidate form, and candidate creation.
pub struct CandidateRegistry<'a> {
    backend: &'a dyn Backend,
    pool: Vec<Candidate>,
}

impl<'a> CandidateRegistry<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            pool: Vec::new(),
        }
    }

    /// Fetch the global candidate pool, the source of reusable records.
    pub async fn refresh_pool(&mut self) -> Result<&[Candidate]> {
        self.pool = self.backend.candidates().await?;
        Ok(&self.pool)
    }

    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }

    /// Candidates standing in the given election, each with their tally
    /// there attached.
    pub async fn standings(&self, election_id: &str) -> Result<Vec<CandidateTally>> {
        let candidates = self.backend.candidates_for(election_id).await?;
        Ok(candidates
            .into_iter()
            .map(|candidate| CandidateTally {
                votes: candidate.tally_for(election_id),
                candidate,
            })
            .collect())
    }

    /// Resolve the admin's choice in the add-candidate dialog into form
    /// data. Total: `New` and any out-of-range reuse index yield the blank
    /// form; a pool hit pre-fills every field, with the `candidate.`
    /// namespace stripped from the student ID.
    pub fn resolve_selection(&self, selection: CandidateSelection) -> CandidateForm {
        let candidate = match selection {
            CandidateSelection::New => None,
            CandidateSelection::Reuse(index) => self.pool.get(index),
        };
        match candidate {
            None => CandidateForm::default(),
            Some(candidate) => CandidateForm {
                name: candidate.name.clone(),
                student_id: candidate.bare_student_id().to_string(),
                faculty: candidate.faculty.clone(),
                party: candidate.party.clone(),
                avatar: candidate.avatar.clone(),
            },
        }
    }

    /// Create a candidate for the election, or re-associate an existing
    /// record with it (the ledger matches on student ID and adds a
    /// zero-valued tally instead of a duplicate). Validation failures
    /// never reach the network.
    pub async fn add_candidate(&self, form: &CandidateForm, election_id: &str) -> Result<String> {
        form.validate()?;
        let request = CandidateRequest::from_form(form, election_id);
        let message = self.backend.create_candidate(&request).await?;
        info!(
            "Candidate {} submitted for election {election_id}",
            form.student_id
        );
        Ok(message)
    }

    /// Final standings for an election, ranked with the winner extracted.
    pub async fn results(&self, election: &Election) -> Result<ElectionResults> {
        let standings = self.standings(&election.election_id).await?;
        Ok(ElectionResults::from_standings(election.clone(), standings))
    }
}
