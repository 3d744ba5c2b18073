mod ballot;
mod candidate;
mod election;
mod phase;
mod voter;

pub use ballot::{Ballot, Credential, VoteReceipt};
#[cfg(test)]
pub(crate) use candidate::CANDIDATE_PREFIX;
pub use candidate::{Candidate, CandidateForm, CandidateSelection, CandidateTally, TallyEntry};
pub use election::{Election, ElectionResults, NewElection};
pub use phase::Phase;
pub use voter::Voter;
