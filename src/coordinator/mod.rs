//! Turn coordinator: serialises access to the match state and wakes the
//! right waiter.
//!
//! ## Locks
//!
//! - **Turn lock** guards the `Table` (match state plus die roller). Every
//!   turn, including the dealer's opening roll, runs inside it.
//! - **Win lock** guards the win latch the dealer waits on. It is kept
//!   apart from the turn lock so the dealer never contends with ordinary
//!   turn traffic.
//!
//! No unit ever holds both locks. A winning player sets its team's flag
//! under the turn lock, releases it, and only then raises the win signal.
//!
//! ## Signals
//!
//! - `turn_available` is broadcast after every turn. Players that wake and
//!   find the turn is not theirs go back to waiting.
//! - `win` is signalled when the latch first records a winner. The dealer
//!   is its only waiter.
//!
//! Every wait re-checks its predicate after waking, so spurious wakes are
//! harmless.
//!
//! ## Faults
//!
//! A poisoned lock means a unit panicked mid-turn. The caller gets
//! `MatchError::Coordination`. `abort` wakes every waiter so a faulted run
//! ends instead of hanging.

mod stats;

use std::sync::{Condvar, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, warn};

use crate::core::{DieRoller, MatchError, MatchState, Result, Team, Unit};
use crate::rules::{Participant, TurnOutcome};

pub use stats::CoordinatorStats;
use stats::Counters;

/// Everything guarded by the turn lock.
#[derive(Debug)]
pub struct Table<R> {
    pub state: MatchState,
    pub dice: R,
}

/// Result of asking for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// The participant held the turn and played it.
    Played(TurnOutcome),
    /// A team has already won; the participant should stop.
    MatchOver,
}

/// Two-lock, two-condvar turn protocol over one shared `MatchState`.
#[derive(Debug)]
pub struct TurnCoordinator<R> {
    table: Mutex<Table<R>>,
    turn_available: Condvar,
    win_latch: Mutex<Option<Team>>,
    win: Condvar,
    aborted_by: OnceLock<Unit>,
    counters: Counters,
}

impl<R: DieRoller> TurnCoordinator<R> {
    /// Create a coordinator with a fresh match state.
    pub fn new(dice: R) -> Self {
        Self::with_state(MatchState::new(), dice)
    }

    /// Create a coordinator over an existing state.
    pub fn with_state(state: MatchState, dice: R) -> Self {
        Self {
            table: Mutex::new(Table { state, dice }),
            turn_available: Condvar::new(),
            win_latch: Mutex::new(None),
            win: Condvar::new(),
            aborted_by: OnceLock::new(),
            counters: Counters::default(),
        }
    }

    /// Block until `participant` holds the turn or the match is over, then
    /// play one turn if it may.
    ///
    /// `after_turn` runs inside the critical section with the updated state,
    /// so whatever it records stays in turn order.
    pub fn take_turn<P, F>(&self, participant: &P, after_turn: F) -> Result<TurnStatus>
    where
        P: Participant + ?Sized,
        F: FnOnce(&MatchState, TurnOutcome),
    {
        let unit = Unit::from(participant.id());
        let mut table = self.lock_table(unit)?;

        while !participant.holds_turn(&table.state) && !table.state.is_over() {
            self.check_aborted(unit)?;
            table = self
                .turn_available
                .wait(table)
                .map_err(|_| MatchError::coordination(unit, "turn lock poisoned while waiting"))?;
            self.counters.record_wakeup();
            if !participant.holds_turn(&table.state) && !table.state.is_over() {
                self.counters.record_spurious();
            }
        }
        self.check_aborted(unit)?;

        if table.state.is_over() {
            debug!(%unit, "match over, leaving turn loop");
            return Ok(TurnStatus::MatchOver);
        }

        let outcome = {
            let table = &mut *table;
            participant.take_turn(&mut table.state, &mut table.dice)
        };
        self.counters.record_turn();
        after_turn(&table.state, outcome);
        drop(table);

        self.turn_available.notify_all();

        if let TurnOutcome::Win(team) = outcome {
            self.signal_win(team, unit)?;
        }

        Ok(TurnStatus::Played(outcome))
    }

    /// Record a winner on the latch and wake the dealer.
    ///
    /// Only the first call records; later calls keep the first winner.
    pub fn signal_win(&self, team: Team, unit: Unit) -> Result<()> {
        let mut latch = self
            .win_latch
            .lock()
            .map_err(|_| MatchError::coordination(unit, "win lock poisoned"))?;

        match *latch {
            None => {
                *latch = Some(team);
                self.counters.record_win_signal();
                debug!(%unit, %team, "win signalled");
            }
            Some(existing) if existing != team => {
                warn!(%unit, %team, %existing, "second winner ignored");
            }
            Some(_) => {}
        }

        self.win.notify_one();
        Ok(())
    }

    /// Block until a team has won.
    pub fn wait_for_win(&self, unit: Unit) -> Result<Team> {
        let mut latch = self
            .win_latch
            .lock()
            .map_err(|_| MatchError::coordination(unit, "win lock poisoned"))?;

        loop {
            if let Some(team) = *latch {
                return Ok(team);
            }
            self.check_aborted(unit)?;
            latch = self
                .win
                .wait(latch)
                .map_err(|_| MatchError::coordination(unit, "win lock poisoned while waiting"))?;
            self.counters.record_dealer_wakeup();
        }
    }

    /// Stop the match after a fault in `unit` and wake every waiter.
    ///
    /// Only the first abort is recorded.
    pub fn abort(&self, unit: Unit) {
        if self.aborted_by.set(unit).is_ok() {
            warn!(%unit, "match aborted");
        }

        // Taking each lock before notifying means no waiter can be between
        // its predicate check and its wait when the notify fires.
        drop(self.table.lock().unwrap_or_else(PoisonError::into_inner));
        self.turn_available.notify_all();
        drop(self.win_latch.lock().unwrap_or_else(PoisonError::into_inner));
        self.win.notify_all();
    }

    /// The unit whose fault aborted the match, if any.
    #[must_use]
    pub fn aborted_by(&self) -> Option<Unit> {
        self.aborted_by.get().copied()
    }

    /// Copy of the current match state.
    pub fn snapshot(&self) -> Result<MatchState> {
        Ok(self.lock_table(Unit::Runner)?.state.clone())
    }

    /// Counters collected so far.
    #[must_use]
    pub fn stats(&self) -> CoordinatorStats {
        self.counters.snapshot()
    }

    /// Consume the coordinator, returning the final table.
    pub fn into_table(self) -> Result<Table<R>> {
        self.table
            .into_inner()
            .map_err(|_| MatchError::coordination(Unit::Runner, "turn lock poisoned"))
    }

    fn lock_table(&self, unit: Unit) -> Result<MutexGuard<'_, Table<R>>> {
        self.table
            .lock()
            .map_err(|_| MatchError::coordination(unit, "turn lock poisoned"))
    }

    fn check_aborted(&self, unit: Unit) -> Result<()> {
        match self.aborted_by() {
            Some(culprit) if culprit != unit => Err(MatchError::coordination(
                unit,
                format!("match aborted by {culprit}"),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParticipantId, ScriptedDice, Seat};
    use crate::rules::{DealerParticipant, PlayerParticipant};

    #[test]
    fn test_dealer_opens_without_waiting() {
        let coordinator = TurnCoordinator::new(ScriptedDice::new([3, 1]));

        let status = coordinator.take_turn(&DealerParticipant, |_, _| {}).unwrap();

        assert_eq!(status, TurnStatus::Played(TurnOutcome::AdvanceTo(Seat::C)));
        let state = coordinator.snapshot().unwrap();
        assert_eq!(state.current_turn, ParticipantId::Player(Seat::C));
        assert_eq!(coordinator.stats().turns, 1);
        assert_eq!(coordinator.stats().wakeups, 0);
    }

    #[test]
    fn test_player_sees_match_over_without_playing() {
        let mut state = MatchState::new();
        state.current_turn = ParticipantId::Player(Seat::A);
        state.team_won[Team::B] = true;
        let coordinator = TurnCoordinator::with_state(state, ScriptedDice::default());

        // Holds the turn, but the match is already decided.
        let status = coordinator
            .take_turn(&PlayerParticipant::new(Seat::A), |_, _| panic!("must not play"))
            .unwrap();

        assert_eq!(status, TurnStatus::MatchOver);
        assert_eq!(coordinator.stats().turns, 0);
    }

    #[test]
    fn test_after_turn_sees_updated_state() {
        let mut state = MatchState::new();
        state.current_turn = ParticipantId::Player(Seat::D);
        let coordinator = TurnCoordinator::with_state(state, ScriptedDice::new([2, 2]));

        let mut seen = None;
        coordinator
            .take_turn(&PlayerParticipant::new(Seat::D), |state, outcome| {
                seen = Some((state.turns.last().copied(), outcome));
            })
            .unwrap();

        let (record, outcome) = seen.unwrap();
        let record = record.unwrap();
        assert_eq!(record.seat, Seat::D);
        assert_eq!(record.sum(), 4);
        assert_eq!(outcome, TurnOutcome::AdvanceTo(Seat::A));
    }

    #[test]
    fn test_win_latch_keeps_first_winner() {
        let coordinator = TurnCoordinator::new(ScriptedDice::default());

        coordinator.signal_win(Team::A, Unit::Player(Seat::C)).unwrap();
        coordinator.signal_win(Team::B, Unit::Player(Seat::D)).unwrap();

        assert_eq!(coordinator.wait_for_win(Unit::Dealer).unwrap(), Team::A);
        assert_eq!(coordinator.stats().win_signals, 1);
    }

    #[test]
    fn test_abort_releases_waiting_dealer() {
        let coordinator = TurnCoordinator::new(ScriptedDice::default());

        std::thread::scope(|s| {
            let waiter = s.spawn(|| coordinator.wait_for_win(Unit::Dealer));
            coordinator.abort(Unit::Player(Seat::B));
            let err = waiter.join().unwrap().unwrap_err();
            assert!(matches!(err, MatchError::Coordination { unit: Unit::Dealer, .. }));
        });

        assert_eq!(coordinator.aborted_by(), Some(Unit::Player(Seat::B)));
    }

    #[test]
    fn test_poisoned_turn_lock_is_a_coordination_fault() {
        let mut state = MatchState::new();
        state.current_turn = ParticipantId::Player(Seat::A);
        let coordinator = TurnCoordinator::with_state(state, ScriptedDice::default());

        // Empty script: the roll panics while the turn lock is held.
        std::thread::scope(|s| {
            let result = s
                .spawn(|| coordinator.take_turn(&PlayerParticipant::new(Seat::A), |_, _| {}))
                .join();
            assert!(result.is_err());
        });

        let err = coordinator
            .take_turn(&PlayerParticipant::new(Seat::B), |_, _| {})
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::Coordination { unit: Unit::Player(Seat::B), .. }
        ));
    }
}
