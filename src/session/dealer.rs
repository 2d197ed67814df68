//! Dealer unit: opening roll, wait for a win, announce the winner.

use tracing::{debug, info};

use crate::coordinator::{TurnCoordinator, TurnStatus};
use crate::core::{DieRoller, MatchError, Result, Team, Unit};
use crate::rules::DealerParticipant;

use super::log::{append_or_warn, LogSink};

/// Announcement line for the winning team.
#[must_use]
pub fn winner_line(team: Team) -> String {
    format!("DEALER: The winning team is {team}")
}

/// Run the dealer to completion. Returns the winning team.
pub fn run_dealer<R: DieRoller>(coordinator: &TurnCoordinator<R>, sink: &dyn LogSink) -> Result<Team> {
    let status = coordinator.take_turn(&DealerParticipant, |state, _| {
        debug!(roll = ?state.last_roll, "dealer opening roll");
    })?;

    if status == TurnStatus::MatchOver {
        return Err(MatchError::coordination(
            Unit::Dealer,
            "match decided before the opening roll",
        ));
    }

    let winner = coordinator.wait_for_win(Unit::Dealer)?;

    info!("The winning team is {winner}");
    append_or_warn(sink, &winner_line(winner));
    // Blank line between runs in the shared log file.
    append_or_warn(sink, "");

    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_line() {
        assert_eq!(winner_line(Team::A), "DEALER: The winning team is A and C");
        assert_eq!(winner_line(Team::B), "DEALER: The winning team is B and D");
    }
}
