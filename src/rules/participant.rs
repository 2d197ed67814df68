//! The two kinds of participant sharing one turn concept.
//!
//! Both roll two dice and hand them to `evaluate`. They differ in when they
//! may act: the dealer only while it holds the opening turn, a player
//! whenever the turn points at its seat.

use crate::core::{DicePair, DieRoller, MatchState, ParticipantId, Seat};

use super::engine::{evaluate, TurnOutcome};

/// A participant that can take turns against the match state.
pub trait Participant {
    /// Who this participant is.
    fn id(&self) -> ParticipantId;

    /// True when the state says it is this participant's turn.
    ///
    /// Does not consider whether the match is over; the coordinator checks
    /// that separately on every wake.
    fn holds_turn(&self, state: &MatchState) -> bool {
        state.current_turn == self.id()
    }

    /// Roll and play one turn.
    fn take_turn(&self, state: &mut MatchState, roller: &mut dyn DieRoller) -> TurnOutcome {
        let dice = DicePair::new(roller.roll(), roller.roll());
        evaluate(self.id(), dice, state, roller)
    }
}

/// The dealer: plays the opening roll that picks the first player.
#[derive(Clone, Copy, Debug, Default)]
pub struct DealerParticipant;

impl Participant for DealerParticipant {
    fn id(&self) -> ParticipantId {
        ParticipantId::Dealer
    }
}

/// A competing player in a fixed seat.
#[derive(Clone, Copy, Debug)]
pub struct PlayerParticipant {
    seat: Seat,
}

impl PlayerParticipant {
    /// Create the player for a seat.
    #[must_use]
    pub const fn new(seat: Seat) -> Self {
        Self { seat }
    }

    /// This player's seat.
    #[must_use]
    pub const fn seat(&self) -> Seat {
        self.seat
    }
}

impl Participant for PlayerParticipant {
    fn id(&self) -> ParticipantId {
        ParticipantId::Player(self.seat)
    }
}
