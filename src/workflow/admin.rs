use chrono::{DateTime, Utc};
use log::info;

use crate::backend::{Backend, FieldUpdate};
use crate::error::{Error, Result};
use crate::model::{CandidateForm, NewElection, Phase, Voter};

use super::registry::CandidateRegistry;

/// Administrator operations: the only mutators of election records.
pub struct AdminActions<'a> {
    backend: &'a dyn Backend,
}

impl<'a> AdminActions<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Create an election. The ledger assigns the identifier and the
    /// bookkeeping timestamps; invalid specs never leave the client.
    pub async fn create_election(&self, spec: &NewElection) -> Result<String> {
        spec.validate()?;
        self.backend.create_election(spec).await
    }

    /// End an election immediately by shortening its end date to `now`.
    ///
    /// The freshest record is fetched first; ending an election that is
    /// already `Ended` is a rejected precondition, not a silent no-op.
    pub async fn end_election_now(&self, election_id: &str, now: DateTime<Utc>) -> Result<String> {
        let election = self.backend.election(election_id).await?;
        if election.phase_at(now) == Phase::Ended {
            return Err(Error::ElectionEnded);
        }
        let message = self
            .backend
            .update_election(election_id, &FieldUpdate::end_date(now))
            .await?;
        info!("Election {election_id} ended early");
        Ok(message)
    }

    /// Create a candidate (new or reused) for an election.
    pub async fn create_candidate(
        &self,
        form: &CandidateForm,
        election_id: &str,
    ) -> Result<String> {
        CandidateRegistry::new(self.backend)
            .add_candidate(form, election_id)
            .await
    }

    /// The full voter roll.
    pub async fn voter_roll(&self) -> Result<Vec<Voter>> {
        self.backend.voters().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::backend::stub::{Call, StubBackend};
    use crate::model::Election;

    use super::*;

    #[tokio::test]
    async fn ending_an_ongoing_election_shortens_its_end_date() {
        let election = Election::ongoing_example();
        let backend = StubBackend::with_elections(vec![election.clone()]);
        let admin = AdminActions::new(&backend);

        let now = Election::example_now();
        let message = admin.end_election_now(&election.election_id, now).await.unwrap();
        assert_eq!(message, "Election updated. Txn committed successfully.");

        let updated = backend.election(&election.election_id).await.unwrap();
        assert_eq!(updated.end_date, now);
        assert_eq!(updated.phase_at(now + Duration::seconds(1)), Phase::Ended);
    }

    #[tokio::test]
    async fn ending_an_ended_election_is_a_rejected_precondition() {
        let election = Election::ended_example();
        let backend = StubBackend::with_elections(vec![election.clone()]);
        let admin = AdminActions::new(&backend);

        let outcome = admin
            .end_election_now(&election.election_id, Election::example_now())
            .await;
        assert!(matches!(outcome, Err(Error::ElectionEnded)));
        // The precondition was checked against the freshest record; no
        // update went out.
        assert_eq!(
            backend.calls(),
            vec![Call::Election(election.election_id.clone())]
        );
    }

    #[tokio::test]
    async fn invalid_election_spec_never_reaches_the_network() {
        let backend = StubBackend::new();
        let admin = AdminActions::new(&backend);

        let now = Election::example_now();
        let spec = NewElection {
            election_name: "PRU Ke-14".to_string(),
            start_date: now + Duration::days(1),
            end_date: now,
        };
        let outcome = admin.create_election(&spec).await;
        assert!(matches!(outcome, Err(Error::Validation(_))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn created_election_is_assigned_a_ledger_identifier() {
        let backend = StubBackend::new();
        let admin = AdminActions::new(&backend);

        let now = Election::example_now();
        let spec = NewElection {
            election_name: "PRU Ke-14".to_string(),
            start_date: now,
            end_date: now + Duration::days(1),
        };
        let id = admin.create_election(&spec).await.unwrap();
        assert!(id.starts_with("election."));
        assert_eq!(backend.election(&id).await.unwrap().election_name, "PRU Ke-14");
    }
}
