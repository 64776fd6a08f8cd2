//! Manufacturing outcome sources
//!
//! The in-manufacturing state asks an [`OutcomeSource`] how a unit turned out.
//! Production runs use [`RandomOutcomes`]; tests script the sequence with
//! [`ScriptedOutcomes`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Result of a single manufacturing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    SystemError,
    DamagedComponent,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [
        Outcome::Success,
        Outcome::SystemError,
        Outcome::DamagedComponent,
    ];
}

/// Provider of manufacturing outcomes
pub trait OutcomeSource {
    fn next_outcome(&mut self) -> Outcome;
}

/// Uniform draw over the three outcomes
#[derive(Debug, Clone)]
pub struct RandomOutcomes<R = StdRng> {
    rng: R,
}

impl RandomOutcomes<StdRng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomOutcomes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeSource for RandomOutcomes<R> {
    fn next_outcome(&mut self) -> Outcome {
        Outcome::ALL[self.rng.random_range(0..Outcome::ALL.len())]
    }
}

/// Fixed outcome sequence; once exhausted every draw returns the fallback
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    script: VecDeque<Outcome>,
    fallback: Outcome,
}

impl ScriptedOutcomes {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            fallback: Outcome::Success,
        }
    }

    /// Every draw yields `outcome`
    pub fn always(outcome: Outcome) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: outcome,
        }
    }

    pub fn with_fallback(mut self, fallback: Outcome) -> Self {
        self.fallback = fallback;
        self
    }

    /// Draws left before the fallback kicks in
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_outcome(&mut self) -> Outcome {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_random_outcomes_are_uniform() {
        let draws = 30_000;
        let mut source = RandomOutcomes::seeded(42);
        let mut counts: HashMap<Outcome, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(source.next_outcome()).or_default() += 1;
        }

        for outcome in Outcome::ALL {
            let freq = counts.get(&outcome).copied().unwrap_or(0) as f64 / draws as f64;
            assert!(
                (freq - 1.0 / 3.0).abs() < 0.02,
                "{:?} frequency {} is not close to 1/3",
                outcome,
                freq
            );
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomOutcomes::seeded(7);
        let mut b = RandomOutcomes::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.next_outcome(), b.next_outcome());
        }
    }

    #[test]
    fn test_scripted_outcomes_then_fallback() {
        let mut source = ScriptedOutcomes::new([Outcome::SystemError, Outcome::DamagedComponent])
            .with_fallback(Outcome::SystemError);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_outcome(), Outcome::SystemError);
        assert_eq!(source.next_outcome(), Outcome::DamagedComponent);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.next_outcome(), Outcome::SystemError);
    }

    #[test]
    fn test_always() {
        let mut source = ScriptedOutcomes::always(Outcome::DamagedComponent);
        for _ in 0..5 {
            assert_eq!(source.next_outcome(), Outcome::DamagedComponent);
        }
    }
}
