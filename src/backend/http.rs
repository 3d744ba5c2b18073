use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Ballot, Candidate, Election, NewElection, VoteReceipt, Voter};

use super::wire::{ApiResponse, CandidateRequest, CreatedElection, FieldUpdate, Keyed, VoterRequest};
use super::Backend;

/// `Backend` implementation over the live REST service.
pub struct HttpBackend {
    client: Client,
    v1: String,
    v2: String,
}

impl HttpBackend {
    /// Build from configuration. Fails only if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            v1: config.v1_url(),
            v2: config.v2_url(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<ApiResponse<T>> {
        debug!("-> GET {url}");
        let envelope = self.client.get(&url).send().await?.json().await?;
        Ok(envelope)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        debug!("-> POST {url}");
        let envelope = self.client.post(&url).json(body).send().await?.json().await?;
        Ok(envelope)
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        debug!("-> PUT {url}");
        let envelope = self.client.put(&url).json(body).send().await?.json().await?;
        Ok(envelope)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn elections(&self) -> Result<Vec<Election>> {
        let rows: Vec<Keyed<Election>> = self
            .get(format!("{}/election", self.v1))
            .await?
            .into_data()?;
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    async fn election(&self, election_id: &str) -> Result<Election> {
        self.get(format!("{}/election/{election_id}", self.v1))
            .await?
            .into_data()
    }

    async fn create_election(&self, spec: &NewElection) -> Result<String> {
        let created: CreatedElection = self
            .post(format!("{}/election", self.v1), spec)
            .await?
            .into_data()?;
        info!("Created election {}", created.election_id);
        Ok(created.election_id)
    }

    async fn update_election(&self, election_id: &str, update: &FieldUpdate) -> Result<String> {
        let envelope: ApiResponse<serde_json::Value> = self
            .put(format!("{}/election/{election_id}", self.v1), update)
            .await?;
        envelope.into_message()
    }

    async fn candidates(&self) -> Result<Vec<Candidate>> {
        let rows: Vec<Keyed<Candidate>> = self
            .get(format!("{}/candidate", self.v1))
            .await?
            .into_data()?;
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    async fn candidates_for(&self, election_id: &str) -> Result<Vec<Candidate>> {
        let rows: Vec<Keyed<Candidate>> = self
            .get(format!("{}/candidate/{election_id}", self.v1))
            .await?
            .into_data()?;
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    async fn create_candidate(&self, request: &CandidateRequest) -> Result<String> {
        let envelope: ApiResponse<serde_json::Value> = self
            .post(format!("{}/candidate", self.v1), request)
            .await?;
        envelope.into_message()
    }

    async fn register_voter(&self, request: &VoterRequest) -> Result<String> {
        let envelope: ApiResponse<serde_json::Value> = self
            .post(format!("{}/voter", self.v1), request)
            .await?;
        envelope.into_message()
    }

    async fn voters(&self) -> Result<Vec<Voter>> {
        let rows: Vec<Keyed<Voter>> = self
            .get(format!("{}/voters", self.v1))
            .await?
            .into_data()?;
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    async fn cast_ballot(&self, ballot: &Ballot) -> Result<VoteReceipt> {
        let envelope: ApiResponse<serde_json::Value> = self
            .post(format!("{}/ballot/vote", self.v2), ballot)
            .await?;
        let message = envelope.into_message()?;
        Ok(VoteReceipt { message })
    }
}
