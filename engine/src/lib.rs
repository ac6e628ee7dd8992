use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod content;
pub mod damage;
pub mod error;
pub mod loader;
pub mod model;
pub mod report;
pub mod round;
pub mod series;
pub mod turn;

pub use damage::{miss_chance, mitigation_and_loss};
pub use error::{CombatError, CombatResult};
pub use loader::{parse_team, InMemorySource, TeamSource};
pub use model::{all_defeated, Attack, AttackKind, Character, Damage, DamageStats, Stats, Team};
pub use round::{play_round, RoundOutcome};
pub use series::{
    play_match, DamageLeaderboard, MatchConfig, MatchOutcome, RoundObserver, RoundReport,
    N_ROUNDS, N_WINS,
};
pub use turn::play_turn;

/// Source of every random decision in a match: special triggers, misses and
/// the first-turn coin flip.
pub trait RngEngine {
    /// Returns true with `probability` percent chance (0–100).
    fn roll(&mut self, probability: f64) -> bool;
}

impl<R: RngEngine + ?Sized> RngEngine for &mut R {
    fn roll(&mut self, probability: f64) -> bool {
        (**self).roll(probability)
    }
}

/// Seeded ChaCha8 stream. Same seed, same match.
pub struct Dice {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    /// Picks a seed from OS entropy. The seed is kept so a run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngEngine for Dice {
    fn roll(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 100.0 {
            return true;
        }
        self.rng.gen_range(0.0..100.0) < probability
    }
}

/// Replays a fixed list of outcomes, then keeps answering with `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    outcomes: VecDeque<bool>,
    fallback: bool,
    requested: Vec<f64>,
}

impl ScriptedDice {
    pub fn new(outcomes: Vec<bool>) -> Self {
        Self { outcomes: outcomes.into(), fallback: false, requested: Vec::new() }
    }

    pub fn always(outcome: bool) -> Self {
        Self::new(Vec::new()).with_fallback(outcome)
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Probabilities passed to `roll`, in call order.
    pub fn requested(&self) -> &[f64] {
        &self.requested
    }
}

impl RngEngine for ScriptedDice {
    fn roll(&mut self, probability: f64) -> bool {
        self.requested.push(probability);
        self.outcomes.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Dice::from_seed(7);
        let mut b = Dice::from_seed(7);
        for _ in 0..200 {
            assert_eq!(a.roll(37.5), b.roll(37.5));
        }
    }

    #[test]
    fn bounds_are_certain() {
        let mut dice = Dice::from_seed(99);
        for _ in 0..200 {
            assert!(!dice.roll(0.0));
            assert!(!dice.roll(-5.0));
            assert!(!dice.roll(f64::NAN));
            assert!(dice.roll(100.0));
            assert!(dice.roll(250.0));
        }
    }

    #[test]
    fn half_chance_is_roughly_half() {
        let mut dice = Dice::from_seed(2024);
        let hits = (0..10_000).filter(|_| dice.roll(50.0)).count();
        assert!((4_500..=5_500).contains(&hits), "hits={hits}");
    }

    #[test]
    fn scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new(vec![true, false]).with_fallback(true);
        assert!(dice.roll(10.0));
        assert!(!dice.roll(20.0));
        assert!(dice.roll(30.0));
        assert_eq!(dice.requested(), &[10.0, 20.0, 30.0]);
    }
}
