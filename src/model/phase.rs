use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phases of the election lifecycle. Derived from timestamps on every
/// evaluation, never stored: `now` keeps advancing, so a cached phase is
/// stale the moment it is computed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The start date is still in the future.
    Upcoming,
    /// Between the start and end dates, both inclusive.
    Ongoing,
    /// The end date has passed; only the results view remains.
    Ended,
}

impl Phase {
    /// Resolve the phase at the given instant.
    ///
    /// The `Ongoing` window is closed at both ends, so an election whose
    /// start and end coincide is still `Ongoing` at exactly that instant.
    /// `now` is injected by the caller; the resolver never reads a wall
    /// clock.
    pub fn resolve(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            Phase::Upcoming
        } else if now > end {
            Phase::Ended
        } else {
            Phase::Ongoing
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Upcoming => "Upcoming",
            Phase::Ongoing => "Ongoing",
            Phase::Ended => "Ended",
        };
        write!(f, "{label}")
    }
}
