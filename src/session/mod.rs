//! Match runner: one dealer thread and four player threads over a shared
//! turn coordinator.
//!
//! ```
//! use matching_dice::core::GameRng;
//! use matching_dice::session::{run_match, MemoryLog};
//!
//! let log = MemoryLog::new();
//! let report = run_match(GameRng::new(42), &log, false).unwrap();
//!
//! let last = log.lines().into_iter().rev().nth(1).unwrap();
//! assert_eq!(last, format!("DEALER: The winning team is {}", report.winner));
//! ```

pub mod dealer;
pub mod log;
pub mod player;

use std::any::Any;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::coordinator::{CoordinatorStats, TurnCoordinator};
use crate::core::{
    DieRoller, GameRng, MatchConfig, MatchError, MatchState, Result, Seat, Team, TurnRecord, Unit,
    SEAT_COUNT,
};

pub use dealer::{run_dealer, winner_line};
pub use log::{FileLog, LogSink, MemoryLog};
pub use player::{run_player, turn_line};

/// Everything known about a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub winner: Team,
    pub opening_seat: Seat,
    /// Turns each seat played, in seat order A-D.
    pub turns_by_seat: [u32; SEAT_COUNT],
    pub turns: Vec<TurnRecord>,
    pub stats: CoordinatorStats,
    pub final_state: MatchState,
}

/// Play one match as configured: seeded RNG, file log.
pub fn play(config: &MatchConfig) -> Result<MatchReport> {
    config.validate()?;
    let sink = FileLog::open(&config.log_path)?;
    info!(seed = config.seed, log = %sink.path().display(), "starting match");
    run_match(GameRng::new(config.seed), &sink, config.echo_turns)
}

/// Play one match with the given dice, logging to `sink`.
///
/// Spawns the dealer and exactly four players, and returns only after all
/// five have finished.
pub fn run_match<R: DieRoller>(dice: R, sink: &dyn LogSink, echo_turns: bool) -> Result<MatchReport> {
    let coordinator = TurnCoordinator::new(dice);

    let (dealer_result, player_results) = thread::scope(|scope| {
        let coordinator = &coordinator;

        let dealer = spawn_unit(scope, Unit::Dealer, coordinator, move || {
            run_dealer(coordinator, sink)
        });

        let players: Vec<_> = Seat::ALL
            .into_iter()
            .map(move |seat| {
                spawn_unit(scope, Unit::Player(seat), coordinator, move || {
                    run_player(seat, coordinator, sink, echo_turns)
                })
            })
            .collect();

        let dealer_result = join_unit(Unit::Dealer, dealer);
        let player_results: Vec<_> = Seat::ALL
            .into_iter()
            .zip(players)
            .map(|(seat, handle)| join_unit(Unit::Player(seat), handle))
            .collect();

        (dealer_result, player_results)
    });

    let mut faults = Vec::new();
    let winner = match dealer_result {
        Ok(team) => Some(team),
        Err(fault) => {
            faults.push(fault);
            None
        }
    };
    let mut turns_by_seat = [0; SEAT_COUNT];
    for (result, slot) in player_results.into_iter().zip(turns_by_seat.iter_mut()) {
        match result {
            Ok(played) => *slot = played,
            Err(fault) => faults.push(fault),
        }
    }

    if !faults.is_empty() {
        // Report the root cause, not the units it woke: a panic first, then
        // whichever unit aborted the match.
        let culprit = coordinator.aborted_by();
        let index = faults
            .iter()
            .position(|f| f.panicked)
            .or_else(|| faults.iter().position(|f| Some(f.unit) == culprit))
            .unwrap_or(0);
        let err = faults.swap_remove(index).error;
        error!(error = %err, "match failed");
        return Err(err);
    }
    let winner = winner.ok_or_else(|| MatchError::coordination(Unit::Dealer, "no winner announced"))?;

    let stats = coordinator.stats();
    let final_state = coordinator.into_table()?.state;
    let opening_seat = final_state
        .opening_seat
        .ok_or_else(|| MatchError::coordination(Unit::Runner, "no opening seat recorded"))?;

    if final_state.winner() != Some(winner) {
        return Err(MatchError::coordination(
            Unit::Runner,
            "dealer announced a team the state does not record",
        ));
    }

    Ok(MatchReport {
        winner,
        opening_seat,
        turns_by_seat,
        turns: final_state.turns.clone(),
        stats,
        final_state,
    })
}

type UnitHandle<'scope, T> = std::io::Result<thread::ScopedJoinHandle<'scope, Result<T>>>;

/// Spawn a named unit thread that aborts the match if it fails or panics.
fn spawn_unit<'scope, 'env, R, T, F>(
    scope: &'scope thread::Scope<'scope, 'env>,
    unit: Unit,
    coordinator: &'scope TurnCoordinator<R>,
    body: F,
) -> UnitHandle<'scope, T>
where
    R: DieRoller,
    T: Send + 'scope,
    F: FnOnce() -> Result<T> + Send + 'scope,
{
    let name = match unit {
        Unit::Player(seat) => format!("player-{}", seat.label()),
        other => other.to_string(),
    };

    let spawned = thread::Builder::new().name(name).spawn_scoped(scope, move || {
        let guard = AbortOnPanic { coordinator, unit };
        let result = body();
        if result.is_err() {
            coordinator.abort(unit);
        }
        drop(guard);
        result
    });

    if spawned.is_err() {
        coordinator.abort(unit);
    }
    spawned
}

/// A unit that did not finish normally.
struct Fault {
    unit: Unit,
    error: MatchError,
    /// The unit panicked or never started, rather than returning an error.
    panicked: bool,
}

fn join_unit<T>(unit: Unit, handle: UnitHandle<'_, T>) -> std::result::Result<T, Fault> {
    let joined = match handle {
        Ok(handle) => handle
            .join()
            .map_err(|payload| format!("panicked: {}", panic_message(&*payload))),
        Err(e) => Err(format!("spawn failed: {e}")),
    };

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(Fault {
            unit,
            error,
            panicked: false,
        }),
        Err(operation) => Err(Fault {
            unit,
            error: MatchError::coordination(unit, operation),
            panicked: true,
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Wakes every waiter if the owning unit unwinds.
struct AbortOnPanic<'a, R: DieRoller> {
    coordinator: &'a TurnCoordinator<R>,
    unit: Unit,
}

impl<R: DieRoller> Drop for AbortOnPanic<'_, R> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.coordinator.abort(self.unit);
        }
    }
}
