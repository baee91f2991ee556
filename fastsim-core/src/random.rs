//! Uniform random source used for Monte-Carlo acceptance decisions.
//!
//! Acceptance formulas never reach for an ambient generator: the caller
//! passes a [`UniformSource`]. Every [`rand::Rng`] is one, so a seeded
//! `StdRng` gives reproducible runs, and [`FixedDraw`] pins the draw in tests.

use rand::Rng;

/// Source of uniform draws.
pub trait UniformSource {
    /// Draws a value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.gen::<f64>()
    }
}

/// Source returning the same unit draw on every call, rescaled to `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraw(pub f64);

impl UniformSource for FixedDraw {
    #[inline]
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.0
    }
}

/// Draws once and reports whether the draw falls below `probability`.
#[inline]
pub fn coin_flip<U: UniformSource + ?Sized>(rng: &mut U, probability: f64) -> bool {
    rng.uniform(0.0, 1.0) < probability
}
