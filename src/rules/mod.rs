//! Game rules for matching dice.
//!
//! - `engine`: turn evaluation (opening selection, scoring, turn advance)
//! - `participant`: the dealer and player capabilities built on it
//!
//! Nothing here locks or blocks; the coordinator calls into these while
//! holding the turn lock.

pub mod engine;
pub mod participant;

pub use engine::{evaluate, TurnOutcome};
pub use participant::{DealerParticipant, Participant, PlayerParticipant};
