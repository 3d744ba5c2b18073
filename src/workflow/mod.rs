//! The user-facing workflows. Each one owns a single interaction with the
//! service and consults the phase resolver before acting.

mod admin;
mod directory;
mod registration;
mod registry;
mod voting;

pub use admin::AdminActions;
pub use directory::ElectionDirectory;
pub use registration::RegistrationFlow;
pub use registry::CandidateRegistry;
pub use voting::{CastOutcome, VoteCastingProtocol, VoteState};
