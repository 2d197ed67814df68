//! Error types for a match run.
//!
//! Three kinds of fault exist:
//! - `Startup`: bad configuration, the core never starts
//! - `Coordination`: a poisoned lock or a panicked unit, fatal to the run
//! - `LogSink`: the game log could not be opened
//!
//! Individual log line failures are not errors: they are reported through
//! `tracing` and the match carries on.

use thiserror::Error;

use super::player::{ParticipantId, Seat};

/// Result alias for match operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Which concurrent unit hit a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Dealer,
    Player(Seat),
    /// The thread that launched and joins the units.
    Runner,
}

impl From<ParticipantId> for Unit {
    fn from(id: ParticipantId) -> Self {
        match id {
            ParticipantId::Dealer => Unit::Dealer,
            ParticipantId::Player(seat) => Unit::Player(seat),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Dealer => write!(f, "dealer"),
            Unit::Player(seat) => write!(f, "player {}", seat.label()),
            Unit::Runner => write!(f, "runner"),
        }
    }
}

/// Errors that abort a match.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Startup error: {reason}")]
    Startup { reason: String },

    #[error("Coordination fault in {unit}: {operation}")]
    Coordination { unit: Unit, operation: String },

    #[error("Log sink error: {0}")]
    LogSink(#[from] std::io::Error),
}

impl MatchError {
    /// Build a startup error.
    pub fn startup(reason: impl Into<String>) -> Self {
        MatchError::Startup {
            reason: reason.into(),
        }
    }

    /// Build a coordination fault for a unit.
    pub fn coordination(unit: impl Into<Unit>, operation: impl Into<String>) -> Self {
        MatchError::Coordination {
            unit: unit.into(),
            operation: operation.into(),
        }
    }
}
