//! Wire shapes of the REST service.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::CandidateForm;

/// The envelope every endpoint wraps its payload in. The embedded `status`
/// mirrors the HTTP status code and is the authoritative success signal;
/// `error` carries rejection text, `message` informational text.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The payload of a successful response, or the rejection mapped onto
    /// the error taxonomy.
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            return Err(self.into_rejection());
        }
        self.data
            .ok_or_else(|| Error::Rejected("response carried no data".to_string()))
    }

    /// The informational message of a successful response.
    pub fn into_message(self) -> Result<String> {
        if !self.is_success() {
            return Err(self.into_rejection());
        }
        Ok(self.message.unwrap_or_default())
    }

    fn into_rejection(self) -> Error {
        let reason = self
            .error
            .or(self.message)
            .unwrap_or_else(|| format!("backend returned status {}", self.status));
        Error::from_rejection(reason)
    }
}

/// A ledger row from a range query: the record plus its ledger key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<T> {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: T,
}

/// Payload of a successful `POST /election`: the assigned identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedElection {
    #[serde(rename = "electionID")]
    pub election_id: String,
}

/// Body of `PUT /election/{id}`: a single-field update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub target: String,
    pub value: String,
}

impl FieldUpdate {
    /// Shorten (or move) the election's end date.
    pub fn end_date(at: DateTime<Utc>) -> Self {
        Self {
            target: "endDate".to_string(),
            value: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Body of `POST /candidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRequest {
    pub name: String,
    /// Bare student ID; the ledger applies the `candidate.` prefix.
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub faculty: String,
    pub party: String,
    pub avatar: String,
    #[serde(rename = "electionId")]
    pub election_id: String,
}

impl CandidateRequest {
    pub fn from_form(form: &CandidateForm, election_id: &str) -> Self {
        Self {
            name: form.name.clone(),
            student_id: form.student_id.clone(),
            faculty: form.faculty.clone(),
            party: form.party.clone(),
            avatar: form.avatar.clone(),
            election_id: election_id.to_string(),
        }
    }
}

/// Body of `POST /voter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRequest {
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub email: String,
    #[serde(rename = "electionID")]
    pub election_id: String,
}
