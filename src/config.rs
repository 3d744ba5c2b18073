use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application configuration, read from `Evote.toml` and `EVOTE_*`
/// environment variables (the environment wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    api_url: String,
    timeout: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8081".to_string(),
            timeout: 30,
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults for unset keys.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("Evote.toml"))
            .merge(Env::prefixed("EVOTE_"))
            .extract()
    }

    /// Root of the v1 API (elections, candidates, voters).
    pub fn v1_url(&self) -> String {
        format!("{}/api/v1", self.api_url.trim_end_matches('/'))
    }

    /// Root of the v2 API (credential-checked ballot casting).
    pub fn v2_url(&self) -> String {
        format!("{}/api/v2", self.api_url.trim_end_matches('/'))
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.into())
    }
}
