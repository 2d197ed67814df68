//! Core types: seats and teams, die rolling, match state, configuration, errors.
//!
//! Everything here is plain data. Locking and threads live in
//! `coordinator` and `session`.

pub mod player;
pub mod rng;
pub mod state;
pub mod config;
pub mod error;

pub use player::{ParticipantId, Seat, Team, TeamMap, SEAT_COUNT};
pub use rng::{DieRoller, GameRng, ScriptedDice, DIE_FACES};
pub use state::{DicePair, MatchState, TurnRecord, TurnResult};
pub use config::{MatchConfig, DEFAULT_LOG_PATH};
pub use error::{MatchError, Result, Unit};
