//! Die rolling: the seeded game RNG and scripted dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical game
//! - **Pluggable**: Anything implementing `DieRoller` can drive a match
//! - **Replayable**: `ScriptedDice` replays a fixed sequence of faces
//!
//! ```
//! use matching_dice::core::{DieRoller, GameRng};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! for _ in 0..20 {
//!     let face = rng1.roll();
//!     assert!((1..=6).contains(&face));
//!     assert_eq!(face, rng2.roll());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Source of six-sided die rolls.
///
/// Rolls are only ever taken while the turn lock is held, so a roller is
/// owned by the coordinator and never shared directly between threads.
pub trait DieRoller: Send {
    /// Roll one die, returning a face in `1..=6`.
    fn roll(&mut self) -> u8;
}

impl<R: DieRoller + ?Sized> DieRoller for Box<R> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

/// Deterministic die roller seeded once at startup.
///
/// Uses ChaCha8 so a seed reproduces the same match on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DieRoller for GameRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of die faces.
///
/// Panics when the script runs out. Inside a match that panic surfaces as a
/// coordination fault of the unit that rolled.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    rolled: usize,
}

impl ScriptedDice {
    /// Create scripted dice from faces in roll order.
    ///
    /// # Panics
    ///
    /// Panics if any face is outside `1..=6`.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: VecDeque<u8> = faces.into_iter().collect();
        assert!(
            faces.iter().all(|f| (1..=DIE_FACES).contains(f)),
            "Die faces must be in 1..=6"
        );
        Self { faces, rolled: 0 }
    }

    /// Faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    /// Faces rolled so far.
    #[must_use]
    pub fn rolled(&self) -> usize {
        self.rolled
    }
}

impl DieRoller for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let face = self
            .faces
            .pop_front()
            .unwrap_or_else(|| panic!("Scripted dice exhausted after {} rolls", self.rolled));
        self.rolled += 1;
        face
    }
}
