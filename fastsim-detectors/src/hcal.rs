//! Hadronic calorimeter.

use fastsim_core::{
    coin_flip, Deposit, Element, ElementKind, FermiDirac, Material, ResolutionModel, ResponseModel,
    UniformSource, VolumeCylinder,
};
use serde::{Deserialize, Serialize};

use crate::calorimeter::Calorimeter;
use crate::error::{Error, Result};

/// Second order polynomial `c0 + c1 x + c2 x^2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadratic {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
}

impl Quadratic {
    /// Creates a polynomial.
    pub const fn new(c0: f64, c1: f64, c2: f64) -> Self {
        Self { c0, c1, c2 }
    }

    /// Evaluates the polynomial.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.c0 + self.c1 * x + self.c2 * (x * x)
    }
}

/// Energy-dependent detection probability in three |eta| bands.
///
/// - central: above `central_min_energy`, probability `central_curve(E)`;
/// - endcap: above `endcap_min_energy`, `endcap_low(E)` below
///   `endcap_split_energy` and `endcap_high(E)` from there on;
/// - forward: deterministic `E > forward_min_energy`.
///
/// Outside the forward band nothing is seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnOnCurves {
    pub central_eta_max: f64,
    pub central_min_energy: f64,
    pub central_curve: FermiDirac,
    pub endcap_eta_max: f64,
    pub endcap_min_energy: f64,
    pub endcap_split_energy: f64,
    pub endcap_low: Quadratic,
    pub endcap_high: FermiDirac,
    pub forward_eta_max: f64,
    pub forward_min_energy: f64,
}

impl TurnOnCurves {
    /// Detection probability, `None` when the cluster is rejected without a
    /// draw.
    fn probability(&self, energy: f64, eta: f64) -> Option<f64> {
        if eta < self.central_eta_max {
            (energy > self.central_min_energy).then(|| self.central_curve.eval(energy))
        } else if eta < self.endcap_eta_max {
            (energy > self.endcap_min_energy).then(|| {
                if energy < self.endcap_split_energy {
                    self.endcap_low.eval(energy)
                } else {
                    self.endcap_high.eval(energy)
                }
            })
        } else if eta < self.forward_eta_max && energy > self.forward_min_energy {
            Some(1.0)
        } else {
            None
        }
    }
}

/// HCAL acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HcalAcceptance {
    /// Probabilistic turn-on by band.
    TurnOn(TurnOnCurves),
    /// `|eta| < eta_max && E > min_energy`.
    Threshold { eta_max: f64, min_energy: f64 },
}

/// Hadronic calorimeter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hcal {
    pub volume: VolumeCylinder,
    pub material: Material,
    pub resolution: ResolutionModel,
    pub response: ResponseModel,
    /// Cluster size, independent of the species.
    pub cluster_size: f64,
    pub acceptance: HcalAcceptance,
}

impl Hcal {
    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for an invalid volume or non-increasing band limits.
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;
        if let HcalAcceptance::TurnOn(curves) = &self.acceptance {
            let limits = [
                curves.central_eta_max,
                curves.endcap_eta_max,
                curves.forward_eta_max,
            ];
            if limits.windows(2).any(|pair| pair[1] <= pair[0]) {
                return Err(Error::ConfigError(format!(
                    "hcal turn-on bands must increase in eta, got {limits:?}"
                )));
            }
        }
        if let ResolutionModel::Override { applied, .. } = &self.resolution {
            log::debug!(
                "hcal resolution fixed to {applied:?}; the calibrated table is not applied"
            );
        }
        Ok(())
    }
}

impl Element for Hcal {
    fn kind(&self) -> ElementKind {
        ElementKind::Hcal
    }

    fn volume(&self) -> &VolumeCylinder {
        &self.volume
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

impl Calorimeter for Hcal {
    #[inline]
    fn energy_resolution(&self, energy: f64, eta: f64) -> f64 {
        self.resolution.relative(energy, eta)
    }

    #[inline]
    fn energy_response(&self, energy: f64, eta: f64) -> f64 {
        self.response.response(energy, eta)
    }

    fn cluster_size(&self, _pdg_id: i32) -> f64 {
        self.cluster_size
    }

    fn acceptance<D, U>(&self, cluster: &D, rng: &mut U) -> bool
    where
        D: Deposit + ?Sized,
        U: UniformSource + ?Sized,
    {
        let energy = cluster.energy();
        let eta = cluster.eta().abs();
        match &self.acceptance {
            HcalAcceptance::TurnOn(curves) => {
                // the forward band is a hard threshold and takes no draw
                if eta >= curves.endcap_eta_max {
                    return curves.probability(energy, eta).is_some();
                }
                curves
                    .probability(energy, eta)
                    .is_some_and(|probability| coin_flip(rng, probability))
            }
            HcalAcceptance::Threshold {
                eta_max,
                min_energy,
            } => eta < *eta_max && energy > *min_energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::Variant;
    use approx::assert_relative_eq;
    use fastsim_core::{Cluster, FixedDraw, RegionTable, StochasticTerms};

    fn cms() -> Hcal {
        Variant::Cms2T.config().hcal
    }

    fn accepts(hcal: &Hcal, energy: f64, eta: f64, draw: f64) -> bool {
        hcal.acceptance(&Cluster::new(energy, eta, 0.0), &mut FixedDraw(draw))
    }

    #[test]
    fn test_never_seen_beyond_forward_band() {
        let hcal = cms();
        for energy in [0.5, 10.0, 1000.0] {
            assert!(!accepts(&hcal, energy, 6.0, 0.0));
            assert!(!accepts(&hcal, energy, -5.0, 0.0));
        }
    }

    #[test]
    fn test_below_central_threshold() {
        let hcal = cms();
        assert!(!accepts(&hcal, 0.5, 0.5, 0.0));
        assert!(!accepts(&hcal, 1.0, 0.5, 0.0));
    }

    #[test]
    fn test_central_turn_on() {
        let hcal = cms();
        // 1 / (1 + exp((2 - 1.93816) / -1.75330)) ~ 0.5088
        assert!(accepts(&hcal, 2.0, 0.5, 0.50));
        assert!(!accepts(&hcal, 2.0, 0.5, 0.51));
        assert!(accepts(&hcal, 50.0, -1.0, 0.99));
    }

    #[test]
    fn test_endcap_quadratic_and_sigmoid() {
        let hcal = cms();
        assert!(!accepts(&hcal, 1.1, 2.0, 0.0));
        // 1.05634 - 0.166943 * 5 + 0.0105997 * 25 ~ 0.4866
        assert!(accepts(&hcal, 5.0, 2.0, 0.48));
        assert!(!accepts(&hcal, 5.0, 2.0, 0.49));
        // 0.809522 / (1 + exp((20 - 9.90855) / -5.30366)) ~ 0.7044
        assert!(accepts(&hcal, 20.0, -2.5, 0.70));
        assert!(!accepts(&hcal, 20.0, -2.5, 0.71));
    }

    #[test]
    fn test_forward_hard_threshold() {
        let hcal = cms();
        assert!(accepts(&hcal, 7.5, 4.0, 0.999));
        assert!(!accepts(&hcal, 7.0, 4.0, 0.0));
        assert!(!accepts(&hcal, 100.0, 5.0, 0.0));
    }

    #[test]
    fn test_forward_band_takes_no_draw() {
        struct Panicking;
        impl UniformSource for Panicking {
            fn uniform(&mut self, _lo: f64, _hi: f64) -> f64 {
                panic!("no draw expected");
            }
        }
        let hcal = cms();
        let cluster = Cluster::new(10.0, 4.0, 0.0);
        assert!(hcal.acceptance(&cluster, &mut Panicking));
        let cold = Cluster::new(0.5, 0.5, 0.0);
        assert!(!hcal.acceptance(&cold, &mut Panicking));
    }

    #[test]
    fn test_fixed_resolution_override() {
        let hcal = cms();
        for eta in [0.0, 1.0, 2.0] {
            for energy in [1.0, 10.0, 100.0] {
                let expected = ((1.1 / f64::sqrt(energy)).powi(2) + 0.09_f64.powi(2)).sqrt();
                assert_relative_eq!(
                    hcal.energy_resolution(energy, eta),
                    expected,
                    max_relative = 1e-12
                );
            }
        }
        assert_relative_eq!(hcal.energy_response(3.0, 2.0), 1.0);
        assert_relative_eq!(hcal.cluster_size(2112), 0.2);
    }

    #[test]
    fn test_regional_resolution_when_not_overridden() {
        let hcal = Variant::Cms2TTracker.config().hcal;
        let barrel = StochasticTerms::new(0.8062, 2.753, 0.1501);
        let endcap = StochasticTerms::new(6.803e-06, 6.676, 0.1716);
        assert_relative_eq!(
            hcal.energy_resolution(5.0, 1.0),
            barrel.relative_resolution(5.0)
        );
        assert_relative_eq!(
            hcal.energy_resolution(5.0, 1.5),
            endcap.relative_resolution(5.0)
        );
        // Fermi-Dirac response at the inflection point
        assert_relative_eq!(hcal.energy_response(4.452, 0.0), 1.036 / 2.0);
        assert_relative_eq!(hcal.energy_response(9.471, -2.0), 1.071 / 2.0);
    }

    #[test]
    fn test_clic_ecal_variant_hcal() {
        let hcal = Variant::Cms2TEcal.config().hcal;
        // Fermi-Dirac half point on either side of the |eta| = 1.3 crack
        assert_relative_eq!(hcal.energy_response(4.452, 0.5), 1.036 / 2.0);
        assert_relative_eq!(hcal.energy_response(9.471, 2.0), 1.071 / 2.0);
        let fixed = StochasticTerms::new(1.1, 0.0, 0.09).relative_resolution(10.0);
        assert_relative_eq!(
            hcal.energy_resolution(10.0, 2.0),
            fixed,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            hcal.energy_resolution(10.0, 0.5),
            fixed,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_clic_threshold_acceptance() {
        let hcal = Variant::Cms2THcal.config().hcal;
        assert!(accepts(&hcal, 1.01, 2.0, 0.99));
        assert!(!accepts(&hcal, 1.0, 2.0, 0.0));
        assert!(!accepts(&hcal, 50.0, 2.76, 0.0));
        assert_relative_eq!(hcal.cluster_size(211), 0.25);
        let terms = StochasticTerms::new(0.60, 0.0, 0.025);
        assert_relative_eq!(
            hcal.energy_resolution(8.0, 2.5),
            terms.relative_resolution(8.0)
        );
    }

    #[test]
    fn test_validation_rejects_unordered_bands() {
        let mut hcal = cms();
        assert!(hcal.validate().is_ok());
        if let HcalAcceptance::TurnOn(curves) = &mut hcal.acceptance {
            curves.endcap_eta_max = 1.0;
        }
        assert!(hcal.validate().is_err());
    }

    #[test]
    fn test_override_keeps_calibrated_table() {
        let hcal = cms();
        let ResolutionModel::Override { calibrated, .. } = &hcal.resolution else {
            panic!("cms hcal resolution is overridden");
        };
        assert_eq!(
            *calibrated,
            RegionTable::new(
                StochasticTerms::new(0.8062, 2.753, 0.1501),
                StochasticTerms::new(6.803e-06, 6.676, 0.1716),
            )
        );
    }
}
