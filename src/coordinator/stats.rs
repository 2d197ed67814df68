//! Coordination counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of what the coordinator has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorStats {
    /// Turns played, including the dealer's opening roll.
    pub turns: u64,
    /// Times a player woke from the turn-available wait.
    pub wakeups: u64,
    /// Wakeups after which the player still had to wait.
    pub spurious_wakeups: u64,
    /// Times the win latch recorded a winner. Exactly 1 after a match.
    pub win_signals: u64,
    /// Times the dealer woke from the win wait.
    pub dealer_wakeups: u64,
}

#[derive(Debug, Default)]
pub(super) struct Counters {
    turns: AtomicU64,
    wakeups: AtomicU64,
    spurious_wakeups: AtomicU64,
    win_signals: AtomicU64,
    dealer_wakeups: AtomicU64,
}

impl Counters {
    pub(super) fn record_turn(&self) {
        self.turns.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_wakeup(&self) {
        self.wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_spurious(&self) {
        self.spurious_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_win_signal(&self) {
        self.win_signals.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_dealer_wakeup(&self) {
        self.dealer_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> CoordinatorStats {
        CoordinatorStats {
            turns: self.turns.load(Ordering::Relaxed),
            wakeups: self.wakeups.load(Ordering::Relaxed),
            spurious_wakeups: self.spurious_wakeups.load(Ordering::Relaxed),
            win_signals: self.win_signals.load(Ordering::Relaxed),
            dealer_wakeups: self.dealer_wakeups.load(Ordering::Relaxed),
        }
    }
}
