//! Participant identification and per-team data storage.
//!
//! ## Seat
//!
//! The four competing players, labelled `A`..`D` and numbered 1-4.
//! Turn order is the fixed cycle A → B → C → D → A.
//!
//! ## Team
//!
//! Fixed partition by seat parity: odd seats (A, C) form `Team::A`,
//! even seats (B, D) form `Team::B`.
//!
//! ## ParticipantId
//!
//! Who holds the turn: the dealer or one of the seats.
//!
//! ## TeamMap
//!
//! Per-team data storage indexed by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of competing players.
pub const SEAT_COUNT: usize = 4;

/// One of the four competing players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
    C,
    D,
}

impl Seat {
    /// All seats in turn order.
    pub const ALL: [Seat; SEAT_COUNT] = [Seat::A, Seat::B, Seat::C, Seat::D];

    /// Seat numbered 1-4, or `None` outside that range.
    ///
    /// ```
    /// use matching_dice::core::Seat;
    ///
    /// assert_eq!(Seat::from_number(3), Some(Seat::C));
    /// assert_eq!(Seat::from_number(5), None);
    /// ```
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Seat::A),
            2 => Some(Seat::B),
            3 => Some(Seat::C),
            4 => Some(Seat::D),
            _ => None,
        }
    }

    /// The 1-based seat number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Seat::A => 1,
            Seat::B => 2,
            Seat::C => 3,
            Seat::D => 4,
        }
    }

    /// The seat that plays after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::C,
            Seat::C => Seat::D,
            Seat::D => Seat::A,
        }
    }

    /// The team this seat belongs to.
    ///
    /// This is the only place team membership is decided.
    #[must_use]
    pub const fn team(self) -> Team {
        match self {
            Seat::A | Seat::C => Team::A,
            Seat::B | Seat::D => Team::B,
        }
    }

    /// Single-letter label used in the game log.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            Seat::A => 'A',
            Seat::B => 'B',
            Seat::C => 'C',
            Seat::D => 'D',
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.label())
    }
}

/// One of the two fixed teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Seats A and C.
    A,
    /// Seats B and D.
    B,
}

impl Team {
    /// Both teams.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// The two seats of this team, in turn order.
    #[must_use]
    pub const fn members(self) -> [Seat; 2] {
        match self {
            Team::A => [Seat::A, Seat::C],
            Team::B => [Seat::B, Seat::D],
        }
    }

    const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second] = self.members();
        write!(f, "{} and {}", first.label(), second.label())
    }
}

/// Holder of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantId {
    /// The coordinating dealer. Only holds the turn before the opening roll.
    Dealer,
    /// A competing player.
    Player(Seat),
}

impl ParticipantId {
    /// The seat, if this is a player.
    #[must_use]
    pub const fn seat(self) -> Option<Seat> {
        match self {
            ParticipantId::Dealer => None,
            ParticipantId::Player(seat) => Some(seat),
        }
    }
}

impl From<Seat> for ParticipantId {
    fn from(seat: Seat) -> Self {
        ParticipantId::Player(seat)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantId::Dealer => write!(f, "Dealer"),
            ParticipantId::Player(seat) => seat.fmt(f),
        }
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use matching_dice::core::{Team, TeamMap};
///
/// let mut sums: TeamMap<Option<u8>> = TeamMap::with_value(None);
/// sums[Team::B] = Some(7);
/// assert_eq!(sums[Team::A], None);
/// assert_eq!(sums[Team::B], Some(7));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> TeamMap<T> {
    /// Create a TeamMap with values from a factory function.
    pub fn new(factory: impl Fn(Team) -> T) -> Self {
        Self {
            data: [factory(Team::A), factory(Team::B)],
        }
    }

    /// Create a TeamMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (Team, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        Team::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_numbers_round_trip() {
        for seat in Seat::ALL {
            assert_eq!(Seat::from_number(seat.number()), Some(seat));
        }
        assert_eq!(Seat::from_number(0), None);
        assert_eq!(Seat::from_number(5), None);
        assert_eq!(Seat::from_number(6), None);
    }

    #[test]
    fn test_seat_cycle() {
        let mut seat = Seat::C;
        let mut visited = Vec::new();
        for _ in 0..8 {
            visited.push(seat);
            seat = seat.next();
        }
        assert_eq!(
            visited,
            vec![Seat::C, Seat::D, Seat::A, Seat::B, Seat::C, Seat::D, Seat::A, Seat::B]
        );
    }

    #[test]
    fn test_team_partition() {
        assert_eq!(Seat::A.team(), Team::A);
        assert_eq!(Seat::C.team(), Team::A);
        assert_eq!(Seat::B.team(), Team::B);
        assert_eq!(Seat::D.team(), Team::B);

        for team in Team::ALL {
            for seat in team.members() {
                assert_eq!(seat.team(), team);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Seat::B), "Player B");
        assert_eq!(format!("{}", Team::A), "A and C");
        assert_eq!(format!("{}", Team::B), "B and D");
        assert_eq!(format!("{}", ParticipantId::Dealer), "Dealer");
        assert_eq!(format!("{}", ParticipantId::from(Seat::D)), "Player D");
    }

    #[test]
    fn test_team_map() {
        let mut map: TeamMap<i32> = TeamMap::new(|t| if t == Team::A { 1 } else { 2 });
        assert_eq!(map[Team::A], 1);
        assert_eq!(map[Team::B], 2);

        map[Team::A] = 10;
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Team::A, &10), (Team::B, &2)]);
    }

    #[test]
    fn test_team_map_serialization() {
        let map: TeamMap<Option<u8>> = TeamMap::new(|t| (t == Team::B).then_some(9));
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: TeamMap<Option<u8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
