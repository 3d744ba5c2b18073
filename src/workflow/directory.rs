use chrono::{DateTime, Utc};
use log::info;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::model::{Election, Phase};

/// The set of elections known to the client. A display cache only: the
/// ledger stays authoritative, and any mutation elsewhere leaves this set
/// stale until the next `refresh`.
pub struct ElectionDirectory<'a> {
    backend: &'a dyn Backend,
    elections: Vec<Election>,
}

impl<'a> ElectionDirectory<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            elections: Vec::new(),
        }
    }

    /// Fetch the full election set, most recently created first. On
    /// failure the cache is left empty so callers render an empty list.
    pub async fn refresh(&mut self) -> Result<&[Election]> {
        self.elections.clear();
        let mut elections = self.backend.elections().await?;
        elections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        info!("Fetched {} elections", elections.len());
        self.elections = elections;
        Ok(&self.elections)
    }

    pub fn elections(&self) -> &[Election] {
        &self.elections
    }

    /// The cached elections currently in `phase`. Phase is derived per
    /// call (`now` keeps advancing); the cache itself is untouched.
    pub fn filter_by_phase(&self, phase: Phase, now: DateTime<Utc>) -> Vec<&Election> {
        self.elections
            .iter()
            .filter(|election| election.phase_at(now) == phase)
            .collect()
    }

    /// Look up a cached election by identifier.
    pub fn select(&self, election_id: &str) -> Result<&Election> {
        self.elections
            .iter()
            .find(|election| election.election_id == election_id)
            .ok_or_else(|| Error::not_found(format!("election '{election_id}'")))
    }
}
