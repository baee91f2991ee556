//! Closed-form energy resolution and response models.
//!
//! Calorimeter resolution is the quadrature sum of a stochastic, a noise and
//! a constant term. The response is a multiplicative bias applied to the true
//! energy before smearing, either flat or shaped like a Fermi-Dirac function.
//!
//! All formulas dividing by the energy require `energy > 0`.

use crate::region::{RegionSelector, RegionTable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stochastic, noise and constant resolution terms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochasticTerms {
    /// Coefficient of `1 / sqrt(E)`.
    pub stochastic: f64,
    /// Coefficient of `1 / E`.
    pub noise: f64,
    /// Energy-independent term.
    pub constant: f64,
}

impl StochasticTerms {
    /// Creates a coefficient triple.
    pub const fn new(stochastic: f64, noise: f64, constant: f64) -> Self {
        Self {
            stochastic,
            noise,
            constant,
        }
    }

    /// Relative energy resolution `sqrt((s/sqrt(E))^2 + (n/E)^2 + c^2)`.
    #[inline]
    #[must_use]
    pub fn relative_resolution(&self, energy: f64) -> f64 {
        debug_assert!(energy > 0.0, "resolution needs a positive energy");
        let stoch = self.stochastic / energy.sqrt();
        let noise = self.noise / energy;
        let constant = self.constant;
        (stoch * stoch + noise * noise + constant * constant).sqrt()
    }
}

/// Fermi-Dirac shaped curve `p0 / (1 + exp((E - p1) / p2))`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FermiDirac {
    /// Plateau value.
    pub p0: f64,
    /// Inflection point.
    pub p1: f64,
    /// Width; negative values give a rising curve.
    pub p2: f64,
}

impl FermiDirac {
    /// Creates a curve.
    pub const fn new(p0: f64, p1: f64, p2: f64) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluates the curve.
    #[inline]
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.p0 / (1.0 + ((x - self.p1) / self.p2).exp())
    }
}

/// How a calorimeter turns `(energy, eta)` into a relative resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResolutionModel {
    /// One triple everywhere.
    Uniform(StochasticTerms),
    /// Triple looked up by region.
    Regional {
        selector: RegionSelector,
        terms: RegionTable<StochasticTerms>,
    },
    /// `applied` is used everywhere; the calibrated table is carried along
    /// but never evaluated.
    Override {
        applied: StochasticTerms,
        calibrated: RegionTable<StochasticTerms>,
    },
}

impl ResolutionModel {
    /// Terms in effect at `eta`.
    pub fn terms(&self, eta: f64) -> &StochasticTerms {
        match self {
            Self::Uniform(terms) | Self::Override { applied: terms, .. } => terms,
            Self::Regional { selector, terms } => terms.get(selector.classify(eta)),
        }
    }

    /// Relative energy resolution.
    #[inline]
    #[must_use]
    pub fn relative(&self, energy: f64, eta: f64) -> f64 {
        self.terms(eta).relative_resolution(energy)
    }
}

/// How a calorimeter biases the true energy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResponseModel {
    /// No bias.
    Unity,
    /// Fermi-Dirac curve looked up by region.
    FermiDirac {
        selector: RegionSelector,
        curves: RegionTable<FermiDirac>,
    },
}

impl ResponseModel {
    /// Multiplicative response.
    #[inline]
    #[must_use]
    pub fn response(&self, energy: f64, eta: f64) -> f64 {
        match self {
            Self::Unity => 1.0,
            Self::FermiDirac { selector, curves } => {
                curves.get(selector.classify(eta)).eval(energy)
            }
        }
    }
}
