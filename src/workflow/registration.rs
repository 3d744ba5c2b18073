use log::{info, warn};

use crate::backend::{Backend, VoterRequest};
use crate::error::{Error, Result};

/// Voter self-registration for one election, fixed at construction.
///
/// `submit` takes `&mut self`, so a flow instance cannot issue a second
/// request while one is outstanding. Duplicate registration is the
/// ledger's call: resubmitting the same data reaches the service and comes
/// back as `DuplicateRegistration`; nothing is masked locally.
pub struct RegistrationFlow<'a> {
    backend: &'a dyn Backend,
    election_id: String,
}

impl<'a> RegistrationFlow<'a> {
    pub fn new(backend: &'a dyn Backend, election_id: impl Into<String>) -> Self {
        Self {
            backend,
            election_id: election_id.into(),
        }
    }

    pub fn election_id(&self) -> &str {
        &self.election_id
    }

    /// Submit the registration: one outbound request, no local
    /// persistence. Empty fields are rejected before anything is sent.
    pub async fn submit(&mut self, student_id: &str, email: &str) -> Result<String> {
        if student_id.trim().is_empty() {
            return Err(Error::validation("student ID must not be empty"));
        }
        if email.trim().is_empty() {
            return Err(Error::validation("email must not be empty"));
        }

        let request = VoterRequest {
            student_id: student_id.to_string(),
            email: email.to_string(),
            election_id: self.election_id.clone(),
        };
        match self.backend.register_voter(&request).await {
            Ok(message) => {
                info!(
                    "Registered voter {student_id} for election {}",
                    self.election_id
                );
                Ok(message)
            }
            Err(err) => {
                warn!(
                    "Registration of {student_id} for election {} failed: {err}",
                    self.election_id
                );
                Err(err)
            }
        }
    }
}
