//! Match state: the single record every participant reads and writes.
//!
//! `MatchState` is owned by the turn coordinator and only ever touched
//! while the turn lock is held. It carries:
//! - Whose turn it is
//! - Each team's most recent turn sum (`None` until a member has played)
//! - Each team's win flag
//! - The last dice pair rolled
//! - A transcript of every player turn

use serde::{Deserialize, Serialize};

use super::player::{ParticipantId, Seat, Team, TeamMap};

/// The two dice rolled on a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePair {
    pub first: u8,
    pub second: u8,
}

impl DicePair {
    /// Create a dice pair.
    #[must_use]
    pub const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Sum of both dice (2-12 for real dice).
    #[must_use]
    pub const fn sum(self) -> u8 {
        self.first + self.second
    }
}

/// What a single player turn did to the team state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResult {
    /// The team had no recorded sum yet.
    Opened,
    /// The sum differed from the team's last sum and replaced it.
    Recorded { previous: u8 },
    /// The sum matched the team's last sum.
    Matched,
}

/// One player turn in the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based position in the match.
    pub number: u32,
    pub seat: Seat,
    pub dice: DicePair,
    pub result: TurnResult,
}

impl TurnRecord {
    /// Sum rolled on this turn.
    #[must_use]
    pub fn sum(&self) -> u8 {
        self.dice.sum()
    }
}

/// Shared mutable record of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Whose turn it is. `Dealer` only until the opening roll.
    pub current_turn: ParticipantId,

    /// Most recent turn sum per team. `None` is the sentinel: it can never
    /// equal an achievable sum, so a team's first turn cannot win.
    pub team_sums: TeamMap<Option<u8>>,

    /// Win flag per team. Latches true once and is never reset.
    pub team_won: TeamMap<bool>,

    /// Dice from the most recent roll, dealer or player.
    pub last_roll: DicePair,

    /// Seat chosen by the dealer's opening roll.
    pub opening_seat: Option<Seat>,

    /// Every player turn, in order.
    pub turns: Vec<TurnRecord>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh state: dealer to play, no sums recorded, nobody has won.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_turn: ParticipantId::Dealer,
            team_sums: TeamMap::with_value(None),
            team_won: TeamMap::with_value(false),
            last_roll: DicePair::default(),
            opening_seat: None,
            turns: Vec::new(),
        }
    }

    /// The winning team, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Team> {
        Team::ALL.into_iter().find(|&team| self.team_won[team])
    }

    /// True once either win flag is set.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.team_won[Team::A] || self.team_won[Team::B]
    }

    /// Number of player turns played.
    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.turns.len()
    }

    /// Seats in the order they played.
    pub fn turn_order(&self) -> impl Iterator<Item = Seat> + '_ {
        self.turns.iter().map(|t| t.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = MatchState::new();

        assert_eq!(state.current_turn, ParticipantId::Dealer);
        assert_eq!(state.team_sums[Team::A], None);
        assert_eq!(state.team_sums[Team::B], None);
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);
        assert_eq!(state.opening_seat, None);
        assert_eq!(state.turns_played(), 0);
    }

    #[test]
    fn test_winner() {
        let mut state = MatchState::new();
        state.team_won[Team::B] = true;

        assert!(state.is_over());
        assert_eq!(state.winner(), Some(Team::B));
    }

    #[test]
    fn test_dice_sum() {
        assert_eq!(DicePair::new(1, 1).sum(), 2);
        assert_eq!(DicePair::new(6, 6).sum(), 12);
        assert_eq!(DicePair::new(3, 4).sum(), 7);
    }

    #[test]
    fn test_turn_order() {
        let mut state = MatchState::new();
        for (i, seat) in [Seat::C, Seat::D].into_iter().enumerate() {
            state.turns.push(TurnRecord {
                number: i as u32 + 1,
                seat,
                dice: DicePair::new(2, 3),
                result: TurnResult::Opened,
            });
        }

        let order: Vec<_> = state.turn_order().collect();
        assert_eq!(order, vec![Seat::C, Seat::D]);
        assert_eq!(state.turns[0].sum(), 5);
    }

    #[test]
    fn test_state_serde() {
        let mut state = MatchState::new();
        state.current_turn = ParticipantId::Player(Seat::B);
        state.team_sums[Team::A] = Some(8);

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MatchState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
