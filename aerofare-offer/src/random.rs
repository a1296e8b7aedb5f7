use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`. The composer and the assembler take
/// this as a seam so callers can swap the thread RNG for a reproducible
/// stream.
pub trait RandomSource {
    fn unit(&mut self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible source for seeded runs and property tests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Plays back an explicit queue of draws, repeating the final one once the
/// queue is exhausted. Used where a test needs exact fare arithmetic.
#[derive(Debug, Clone)]
pub struct FixedDraws {
    draws: Vec<f64>,
    next: usize,
}

impl FixedDraws {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }
}

impl RandomSource for FixedDraws {
    fn unit(&mut self) -> f64 {
        let idx = self.next.min(self.draws.len().saturating_sub(1));
        let draw = self.draws.get(idx).copied().unwrap_or(0.5);
        self.next += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_streams_are_reproducible_and_in_range() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..100 {
            let draw = a.unit();
            assert_eq!(draw, b.unit());
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn fixed_draws_play_back_then_repeat_the_last() {
        let mut rng = FixedDraws::new(vec![0.1, 0.9]);
        assert_eq!(rng.unit(), 0.1);
        assert_eq!(rng.unit(), 0.9);
        assert_eq!(rng.unit(), 0.9);
        assert_eq!(rng.unit(), 0.9);
    }
}
