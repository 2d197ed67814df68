//! # matching-dice
//!
//! A dealer and four players play matching dice, each on its own thread.
//!
//! ## Rules
//!
//! 1. **Opening**: The dealer rolls a die until it shows 1-4 and hands the
//!    turn to that player (A, B, C or D).
//!
//! 2. **Turns**: Players roll two dice in the fixed order A → B → C → D → A.
//!
//! 3. **Winning**: A and C are one team, B and D the other. A team wins when
//!    a player rolls the same sum their teammate rolled on the team's
//!    previous turn.
//!
//! ## Architecture
//!
//! - **One shared state**: `MatchState` lives behind the coordinator's turn
//!   lock and is never touched outside it.
//!
//! - **Two locks, two condvars**: players wait on "turn available", the
//!   dealer waits on "win". No unit holds both locks at once.
//!
//! - **Deterministic**: Only one unit rolls at a time, so a seed fixes the
//!   whole match.
//!
//! ## Modules
//!
//! - `core`: Seats, teams, dice, state, configuration, errors
//! - `rules`: Turn evaluation and the dealer/player participants
//! - `coordinator`: The lock and condition-variable turn protocol
//! - `session`: Log sinks, the dealer and player units, the match runner

pub mod core;
pub mod rules;
pub mod coordinator;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ParticipantId, Seat, Team, TeamMap,
    DieRoller, GameRng, ScriptedDice,
    DicePair, MatchState, TurnRecord, TurnResult,
    MatchConfig, MatchError, Result, Unit,
};

pub use crate::rules::{evaluate, DealerParticipant, Participant, PlayerParticipant, TurnOutcome};

pub use crate::coordinator::{CoordinatorStats, TurnCoordinator, TurnStatus};

pub use crate::session::{play, run_match, FileLog, LogSink, MatchReport, MemoryLog};
