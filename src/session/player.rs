//! Player unit: waits for its seat's turn, plays, repeats until a team wins.

use tracing::{debug, info};

use crate::coordinator::{TurnCoordinator, TurnStatus};
use crate::core::{DieRoller, Result, Seat, TurnRecord};
use crate::rules::PlayerParticipant;

use super::log::{append_or_warn, LogSink};

/// Log line for one player turn.
#[must_use]
pub fn turn_line(record: &TurnRecord) -> String {
    format!(
        "Player {}: gets {} and {} with a sum {}",
        record.seat.label(),
        record.dice.first,
        record.dice.second,
        record.sum()
    )
}

/// Run the player in `seat` to completion. Returns the turns it played.
pub fn run_player<R: DieRoller>(
    seat: Seat,
    coordinator: &TurnCoordinator<R>,
    sink: &dyn LogSink,
    echo_turns: bool,
) -> Result<u32> {
    let player = PlayerParticipant::new(seat);
    let mut played = 0;

    loop {
        let status = coordinator.take_turn(&player, |state, _| {
            if let Some(record) = state.turns.last() {
                if echo_turns {
                    info!(
                        "Player {}: {} {}",
                        seat.label(),
                        record.dice.first,
                        record.dice.second
                    );
                }
                append_or_warn(sink, &turn_line(record));
            }
        })?;

        match status {
            TurnStatus::Played(_) => played += 1,
            TurnStatus::MatchOver => break,
        }
    }

    debug!(%seat, played, "player done");
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DicePair, TurnResult};

    #[test]
    fn test_turn_line_format() {
        let record = TurnRecord {
            number: 1,
            seat: Seat::C,
            dice: DicePair::new(6, 3),
            result: TurnResult::Opened,
        };
        assert_eq!(turn_line(&record), "Player C: gets 6 and 3 with a sum 9");
    }
}
