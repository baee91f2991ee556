//! Inner tracking system.
//!
//! The tracker sees charged tracks above a transverse-momentum threshold
//! with a fixed efficiency, either in |eta| bands or inside a polar-angle
//! cone, and measures their transverse momentum with a relative resolution.

use fastsim_core::{
    coin_flip, Element, ElementKind, Kinematics, Material, UniformSource, VolumeCylinder,
};
use serde::{Deserialize, Serialize};

use crate::acceptance::{band_efficiency, check_bands, check_probability, EfficiencyBand};
use crate::error::{Error, Result};

/// Tracker acceptance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerAcceptance {
    /// `pt > min_pt`, then the efficiency of the first matching |eta| band.
    Banded {
        min_pt: f64,
        bands: Vec<EfficiencyBand>,
    },
    /// `|theta| < theta_max_deg && pt > min_pt`, then `efficiency`.
    Polar {
        theta_max_deg: f64,
        min_pt: f64,
        efficiency: f64,
    },
}

/// One entry of an angle-binned resolution table.
///
/// `sigma(pt) / pt^2 = sqrt(a^2 + (b / pt)^2)` for tracks with
/// `|theta| < max_theta_deg` not covered by a finer bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularBin {
    pub max_theta_deg: f64,
    pub a: f64,
    pub b: f64,
}

impl AngularBin {
    /// Creates a bin.
    pub const fn new(max_theta_deg: f64, a: f64, b: f64) -> Self {
        Self { max_theta_deg, a, b }
    }

    /// Relative transverse-momentum resolution `sigma(pt) / pt`.
    #[inline]
    pub fn relative(&self, pt: f64) -> f64 {
        let b_over_pt = self.b / pt;
        (self.a * self.a + b_over_pt * b_over_pt).sqrt() * pt
    }
}

/// Tracker momentum resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerResolution {
    /// Same relative resolution for every track.
    Constant(f64),
    /// Bins ordered from the finest to the coarsest angle.
    AngleBinned(Vec<AngularBin>),
}

impl TrackerResolution {
    /// Bin applying to a track at `theta_deg` degrees from the transverse
    /// plane: the first bin, scanning from the finest, with
    /// `theta_deg < max_theta_deg`.
    pub fn bin(&self, theta_deg: f64) -> Option<&AngularBin> {
        match self {
            Self::Constant(_) => None,
            Self::AngleBinned(bins) => bins.iter().find(|bin| theta_deg < bin.max_theta_deg),
        }
    }
}

/// Tracker parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub volume: VolumeCylinder,
    pub material: Material,
    pub acceptance: TrackerAcceptance,
    pub resolution: TrackerResolution,
}

impl Tracker {
    /// Decides whether a track is reconstructed.
    pub fn acceptance<K, U>(&self, track: &K, rng: &mut U) -> bool
    where
        K: Kinematics + ?Sized,
        U: UniformSource + ?Sized,
    {
        let pt = track.pt();
        match &self.acceptance {
            TrackerAcceptance::Banded { min_pt, bands } => {
                pt > *min_pt
                    && band_efficiency(bands, track.eta())
                        .is_some_and(|efficiency| coin_flip(rng, efficiency))
            }
            TrackerAcceptance::Polar {
                theta_max_deg,
                min_pt,
                efficiency,
            } => {
                track.theta().abs() < theta_max_deg.to_radians()
                    && pt > *min_pt
                    && coin_flip(rng, *efficiency)
            }
        }
    }

    /// Relative transverse-momentum resolution of a track.
    ///
    /// # Errors
    /// Returns [`Error::NoResolutionBin`] when an angle-binned table does not
    /// cover the track direction.
    pub fn resolution<K: Kinematics + ?Sized>(&self, track: &K) -> Result<f64> {
        match &self.resolution {
            TrackerResolution::Constant(value) => Ok(*value),
            TrackerResolution::AngleBinned(_) => {
                let theta_deg = track.theta().abs().to_degrees();
                let bin = self
                    .resolution
                    .bin(theta_deg)
                    .ok_or(Error::NoResolutionBin { theta_deg })?;
                Ok(bin.relative(track.pt()))
            }
        }
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for an invalid volume, malformed bands or bins.
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;
        match &self.acceptance {
            TrackerAcceptance::Banded { bands, .. } => check_bands("tracker acceptance", bands)?,
            TrackerAcceptance::Polar { efficiency, .. } => {
                check_probability("tracker efficiency", *efficiency)?;
            }
        }
        match &self.resolution {
            TrackerResolution::Constant(value) if *value < 0.0 => {
                return Err(Error::ConfigError(format!(
                    "tracker resolution must not be negative, got {value}"
                )));
            }
            TrackerResolution::Constant(_) => {}
            TrackerResolution::AngleBinned(bins) => {
                if bins.is_empty() {
                    return Err(Error::ConfigError(
                        "tracker resolution table has no bins".to_string(),
                    ));
                }
                if bins
                    .windows(2)
                    .any(|pair| pair[1].max_theta_deg <= pair[0].max_theta_deg)
                {
                    return Err(Error::ConfigError(
                        "tracker resolution bins must go from the finest to the coarsest angle"
                            .to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Element for Tracker {
    fn kind(&self) -> ElementKind {
        ElementKind::Tracker
    }

    fn volume(&self) -> &VolumeCylinder {
        &self.volume
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
