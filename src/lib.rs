//! Client for the ledger-backed e-voting service.
//!
//! The service persists elections, candidates, voters and votes; this crate
//! holds no authoritative state. It derives each election's lifecycle phase
//! from timestamps, gates which actions are permitted in each phase, and
//! drives the candidate-registration, voter-registration and vote-casting
//! workflows against the REST API.

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
