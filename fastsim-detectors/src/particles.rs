//! Detector-level electron and muon parametrizations.
//!
//! These models short-circuit the element-by-element simulation: a true
//! electron or muon is accepted and smeared as a whole.

use fastsim_core::{coin_flip, Kinematics, UniformSource};
use serde::{Deserialize, Serialize};

use crate::acceptance::{band_efficiency, check_bands, check_probability, EfficiencyBand};
use crate::error::{Error, Result};
use crate::tracker::Tracker;

/// Electron acceptance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectronAcceptance {
    /// One draw is always taken; `pt >= min_pt`, then the first matching band.
    Banded {
        min_pt: f64,
        bands: Vec<EfficiencyBand>,
    },
    /// Deterministic `|p| > min_momentum && |eta| < max_abs_eta`.
    Window { min_momentum: f64, max_abs_eta: f64 },
    /// `|p| > min_momentum && |theta| < theta_max_deg`, then `efficiency`.
    Polar {
        min_momentum: f64,
        theta_max_deg: f64,
        efficiency: f64,
    },
}

/// Electron momentum resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectronResolution {
    Constant(f64),
    /// `a / sqrt(E)`.
    Stochastic(f64),
}

/// Electron parametrization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronModel {
    pub acceptance: ElectronAcceptance,
    pub resolution: ElectronResolution,
}

impl ElectronModel {
    /// Decides whether an electron is reconstructed.
    pub fn acceptance<K, U>(&self, electron: &K, rng: &mut U) -> bool
    where
        K: Kinematics + ?Sized,
        U: UniformSource + ?Sized,
    {
        match &self.acceptance {
            ElectronAcceptance::Banded { min_pt, bands } => {
                banded_acceptance(*min_pt, bands, electron, rng)
            }
            ElectronAcceptance::Window {
                min_momentum,
                max_abs_eta,
            } => electron.momentum() > *min_momentum && electron.eta().abs() < *max_abs_eta,
            ElectronAcceptance::Polar {
                min_momentum,
                theta_max_deg,
                efficiency,
            } => {
                electron.momentum() > *min_momentum
                    && electron.theta().abs() < theta_max_deg.to_radians()
                    && coin_flip(rng, *efficiency)
            }
        }
    }

    /// Relative momentum resolution.
    pub fn resolution<K: Kinematics + ?Sized>(&self, electron: &K) -> f64 {
        match self.resolution {
            ElectronResolution::Constant(value) => value,
            ElectronResolution::Stochastic(a) => {
                let energy = electron.energy();
                debug_assert!(energy > 0.0, "electron energy must be positive");
                a / energy.sqrt()
            }
        }
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for malformed bands or efficiencies.
    pub fn validate(&self) -> Result<()> {
        match &self.acceptance {
            ElectronAcceptance::Banded { bands, .. } => check_bands("electron acceptance", bands),
            ElectronAcceptance::Polar { efficiency, .. } => {
                check_probability("electron efficiency", *efficiency)
            }
            ElectronAcceptance::Window { .. } => Ok(()),
        }
    }
}

/// Muon acceptance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuonAcceptance {
    /// One draw is always taken; `pt >= min_pt`, then the first matching band.
    Banded {
        min_pt: f64,
        bands: Vec<EfficiencyBand>,
    },
    /// Deterministic `pt > min_pt && |eta| < max_abs_eta`.
    Window { min_pt: f64, max_abs_eta: f64 },
}

/// One |eta| band of the muon resolution table.
///
/// The band with `max_abs_eta: None` catches everything beyond the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuonBand {
    pub max_abs_eta: Option<f64>,
    pub constant: f64,
    pub slope: f64,
}

impl MuonBand {
    /// Creates a band.
    pub const fn new(max_abs_eta: Option<f64>, constant: f64, slope: f64) -> Self {
        Self {
            max_abs_eta,
            constant,
            slope,
        }
    }

    fn contains(&self, eta: f64) -> bool {
        self.max_abs_eta.map_or(true, |max| eta < max)
    }

    /// `sqrt(constant^2 + slope^2)`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.constant.hypot(self.slope)
    }
}

/// Muon momentum resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuonResolution {
    Constant(f64),
    EtaBanded(Vec<MuonBand>),
    /// Same as the tracker resolution for the muon track.
    Tracker,
}

/// Muon parametrization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuonModel {
    pub acceptance: MuonAcceptance,
    pub resolution: MuonResolution,
}

impl MuonModel {
    /// Decides whether a muon is reconstructed.
    pub fn acceptance<K, U>(&self, muon: &K, rng: &mut U) -> bool
    where
        K: Kinematics + ?Sized,
        U: UniformSource + ?Sized,
    {
        match &self.acceptance {
            MuonAcceptance::Banded { min_pt, bands } => {
                banded_acceptance(*min_pt, bands, muon, rng)
            }
            MuonAcceptance::Window {
                min_pt,
                max_abs_eta,
            } => muon.pt() > *min_pt && muon.eta().abs() < *max_abs_eta,
        }
    }

    /// Relative momentum resolution.
    ///
    /// # Errors
    /// Returns [`Error::NoMuonBand`] when no band covers the muon, or the
    /// tracker error when the resolution is delegated.
    pub fn resolution<K: Kinematics + ?Sized>(&self, muon: &K, tracker: &Tracker) -> Result<f64> {
        match &self.resolution {
            MuonResolution::Constant(value) => Ok(*value),
            MuonResolution::EtaBanded(bands) => {
                let eta = muon.eta().abs();
                bands
                    .iter()
                    .find(|band| band.contains(eta))
                    .map(MuonBand::value)
                    .ok_or(Error::NoMuonBand { eta })
            }
            MuonResolution::Tracker => tracker.resolution(muon),
        }
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for malformed acceptance bands or a resolution table
    /// without a final catch-all band.
    pub fn validate(&self) -> Result<()> {
        if let MuonAcceptance::Banded { bands, .. } = &self.acceptance {
            check_bands("muon acceptance", bands)?;
        }
        if let MuonResolution::EtaBanded(bands) = &self.resolution {
            let Some((last, bounded)) = bands.split_last() else {
                return Err(Error::ConfigError("muon resolution table has no bands".to_string()));
            };
            if last.max_abs_eta.is_some() || bounded.iter().any(|b| b.max_abs_eta.is_none()) {
                return Err(Error::ConfigError(
                    "muon resolution table must end with exactly one open band".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn banded_acceptance<K, U>(min_pt: f64, bands: &[EfficiencyBand], particle: &K, rng: &mut U) -> bool
where
    K: Kinematics + ?Sized,
    U: UniformSource + ?Sized,
{
    let draw = rng.uniform(0.0, 1.0);
    if particle.pt() < min_pt {
        return false;
    }
    band_efficiency(bands, particle.eta()).is_some_and(|efficiency| draw < efficiency)
}
