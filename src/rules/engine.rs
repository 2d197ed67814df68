//! Turn logic: how one roll changes the match state.
//!
//! - The dealer's roll picks the opening seat. Only the first die counts,
//!   and it is re-rolled until it shows 1-4.
//! - A player's roll is compared against the last sum recorded for their
//!   team. A match wins; anything else replaces the recorded sum.
//! - After every player turn the turn passes to the next seat, even on a
//!   win. The coordinator stops play by checking the win flags.

use tracing::debug;

use crate::core::{DicePair, DieRoller, MatchState, ParticipantId, Seat, Team, TurnRecord, TurnResult};

/// What a turn produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Play continues with this seat.
    AdvanceTo(Seat),
    /// The team's sums matched. The turn has still been advanced.
    Win(Team),
}

impl TurnOutcome {
    /// The winning team, if this turn won.
    #[must_use]
    pub fn winner(self) -> Option<Team> {
        match self {
            TurnOutcome::Win(team) => Some(team),
            TurnOutcome::AdvanceTo(_) => None,
        }
    }
}

/// Evaluate one turn for `participant` with the dice already rolled.
///
/// The roller is only used by the dealer, to re-roll an out-of-range
/// opening die.
pub fn evaluate<R>(
    participant: ParticipantId,
    dice: DicePair,
    state: &mut MatchState,
    roller: &mut R,
) -> TurnOutcome
where
    R: DieRoller + ?Sized,
{
    match participant {
        ParticipantId::Dealer => {
            let seat = open_match(dice, state, roller);
            TurnOutcome::AdvanceTo(seat)
        }
        ParticipantId::Player(seat) => score_turn(seat, dice, state),
    }
}

/// Resolve the dealer's opening roll and hand the turn to the chosen seat.
fn open_match<R>(mut dice: DicePair, state: &mut MatchState, roller: &mut R) -> Seat
where
    R: DieRoller + ?Sized,
{
    debug_assert_eq!(state.current_turn, ParticipantId::Dealer, "Opening roll played twice");

    let seat = loop {
        match Seat::from_number(dice.first) {
            Some(seat) => break seat,
            None => {
                debug!(face = dice.first, "dealer re-rolls opening die");
                dice.first = roller.roll();
            }
        }
    };

    state.last_roll = dice;
    state.opening_seat = Some(seat);
    state.current_turn = ParticipantId::Player(seat);
    debug!(%seat, "dealer picks opening player");
    seat
}

/// Score a player's roll against their team's last sum.
fn score_turn(seat: Seat, dice: DicePair, state: &mut MatchState) -> TurnOutcome {
    debug_assert_eq!(state.current_turn, ParticipantId::Player(seat), "Played out of turn");
    debug_assert!(!state.is_over(), "Played after the match ended");

    let team = seat.team();
    let sum = dice.sum();

    let result = match state.team_sums[team] {
        Some(previous) if previous == sum => {
            state.team_won[team] = true;
            TurnResult::Matched
        }
        Some(previous) => {
            state.team_sums[team] = Some(sum);
            TurnResult::Recorded { previous }
        }
        None => {
            state.team_sums[team] = Some(sum);
            TurnResult::Opened
        }
    };

    state.last_roll = dice;
    state.turns.push(TurnRecord {
        number: state.turns.len() as u32 + 1,
        seat,
        dice,
        result,
    });

    let next = seat.next();
    state.current_turn = ParticipantId::Player(next);

    if result == TurnResult::Matched {
        TurnOutcome::Win(team)
    } else {
        TurnOutcome::AdvanceTo(next)
    }
}
