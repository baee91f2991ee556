//! Built-in detector configurations.
//!
//! `CMS_2T` is the CMS-like reference. The three other variants each swap
//! one subsystem for a CLIC-like one:
//!
//! | variant          | tracker | ecal | hcal | electrons/muons     |
//! |------------------|---------|------|------|---------------------|
//! | `CMS_2T`         | CMS     | CMS  | CMS  | banded efficiencies |
//! | `CMS_2T_ECAL`    | CMS     | CLIC | CMS  | simple windows      |
//! | `CMS_2T_HCAL`    | CMS     | CMS  | CLIC | simple windows      |
//! | `CMS_2T_Tracker` | CLIC    | CMS  | CMS  | tracker-driven      |
#![allow(clippy::unreadable_literal)]

use std::fmt;
use std::str::FromStr;

use fastsim_core::{
    FermiDirac, Material, RegionSelector, RegionTable, ResolutionModel, ResponseModel,
    StochasticTerms, SurfaceCylinder, VolumeCylinder,
};

use crate::acceptance::EfficiencyBand;
use crate::config::DetectorConfig;
use crate::detector::Detector;
use crate::ecal::{ClusterSize, Ecal, EtaBoundary};
use crate::error::Result;
use crate::hcal::{Hcal, HcalAcceptance, Quadratic, TurnOnCurves};
use crate::particles::{
    ElectronAcceptance, ElectronModel, ElectronResolution, MuonAcceptance, MuonBand, MuonModel,
    MuonResolution,
};
use crate::passive::{BeamPipe, Field};
use crate::tracker::{AngularBin, Tracker, TrackerAcceptance, TrackerResolution};

/// Built-in detector variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Cms2T,
    Cms2TEcal,
    Cms2THcal,
    Cms2TTracker,
}

impl Variant {
    pub const ALL: [Self; 4] = [Self::Cms2T, Self::Cms2TEcal, Self::Cms2THcal, Self::Cms2TTracker];

    /// Command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cms2T => "cms-2t",
            Self::Cms2TEcal => "cms-2t-ecal",
            Self::Cms2THcal => "cms-2t-hcal",
            Self::Cms2TTracker => "cms-2t-tracker",
        }
    }

    /// Detector name carried by the configuration.
    pub fn detector_name(&self) -> &'static str {
        match self {
            Self::Cms2T => "CMS_2T",
            Self::Cms2TEcal => "CMS_2T_ECAL",
            Self::Cms2THcal => "CMS_2T_HCAL",
            Self::Cms2TTracker => "CMS_2T_Tracker",
        }
    }

    /// Full configuration of this variant.
    pub fn config(&self) -> DetectorConfig {
        match self {
            Self::Cms2T => DetectorConfig {
                name: self.detector_name().to_string(),
                tracker: cms_tracker(),
                ecal: cms_ecal(shell("ecal", 1.55, 2.1, 1.30, 2.0)),
                hcal: cms_hcal(shell("hcal", 2.9, 3.6, 1.9, 2.6)),
                field: field(solid("field", 2.9, 3.6)),
                beampipe: beampipe(),
                electron: ElectronModel {
                    acceptance: ElectronAcceptance::Banded {
                        min_pt: 10.0,
                        bands: vec![EfficiencyBand::new(1.5, 0.95), EfficiencyBand::new(2.5, 0.85)],
                    },
                    resolution: ElectronResolution::Constant(0.03),
                },
                muon: MuonModel {
                    acceptance: MuonAcceptance::Banded {
                        min_pt: 10.0,
                        bands: vec![EfficiencyBand::new(2.4, 0.95)],
                    },
                    resolution: MuonResolution::EtaBanded(vec![
                        MuonBand::new(Some(0.5), 0.01, 1e-4),
                        MuonBand::new(Some(1.5), 0.015, 1.5e-4),
                        MuonBand::new(None, 0.025, 3.5e-4),
                    ]),
                },
                jet_energy_correction: Some(1.1),
            },
            Self::Cms2TEcal => {
                let mut hcal = cms_hcal(shell("hcal", 2.9, 3.6, 1.9, 2.6));
                hcal.response = hcal_response();
                DetectorConfig {
                    name: self.detector_name().to_string(),
                    tracker: cms_tracker(),
                    ecal: clic_ecal(),
                    hcal,
                    field: field(solid("field", 2.9, 3.6)),
                    beampipe: beampipe(),
                    electron: stochastic_electron(ElectronAcceptance::Window {
                        min_momentum: 5.0,
                        max_abs_eta: 2.5,
                    }),
                    muon: window_muon(MuonResolution::Constant(0.02)),
                    jet_energy_correction: Some(1.1),
                }
            }
            Self::Cms2THcal => DetectorConfig {
                name: self.detector_name().to_string(),
                tracker: cms_tracker(),
                ecal: cms_ecal(shell("ecal", 1.55, 2.1, 1.30, 2.0)),
                hcal: clic_hcal(),
                field: field(solid("field", 2.9, 3.6)),
                beampipe: beampipe(),
                electron: stochastic_electron(ElectronAcceptance::Window {
                    min_momentum: 5.0,
                    max_abs_eta: 2.5,
                }),
                muon: window_muon(MuonResolution::Constant(0.02)),
                jet_energy_correction: None,
            },
            Self::Cms2TTracker => {
                let mut hcal = cms_hcal(shell("hcal", 3.75, 3.6, 2.75, 2.6));
                hcal.resolution = ResolutionModel::Regional {
                    selector: RegionSelector::crack(1.3),
                    terms: hcal_calibrated_terms(),
                };
                hcal.response = hcal_response();
                DetectorConfig {
                    name: self.detector_name().to_string(),
                    tracker: clic_tracker(),
                    ecal: cms_ecal(shell("ecal", 2.4, 2.1, 2.15, 2.0)),
                    hcal,
                    field: field(solid("field", 3.75, 3.6)),
                    beampipe: beampipe(),
                    electron: stochastic_electron(ElectronAcceptance::Polar {
                        min_momentum: 5.0,
                        theta_max_deg: 80.0,
                        efficiency: 0.95,
                    }),
                    muon: window_muon(MuonResolution::Tracker),
                    jet_energy_correction: None,
                }
            }
        }
    }

    /// Validated detector of this variant.
    ///
    /// # Errors
    /// Never fails for the built-in tables; the result is kept for symmetry
    /// with [`Detector::new`].
    pub fn detector(&self) -> Result<Detector> {
        Detector::new(self.config())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = fastsim_core::Error;

    /// Accepts the command-line name or the detector name, ignoring case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| {
                variant.as_str().eq_ignore_ascii_case(s)
                    || variant.detector_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| fastsim_core::Error::UnknownVariant(s.to_string()))
    }
}

fn shell(name: &str, radius: f64, z: f64, inner_radius: f64, inner_z: f64) -> VolumeCylinder {
    VolumeCylinder {
        name: name.to_string(),
        outer: SurfaceCylinder::new(format!("{name}_out"), radius, z),
        inner: Some(SurfaceCylinder::new(format!("{name}_in"), inner_radius, inner_z)),
    }
}

fn solid(name: &str, radius: f64, z: f64) -> VolumeCylinder {
    VolumeCylinder {
        name: name.to_string(),
        outer: SurfaceCylinder::new(format!("{name}_out"), radius, z),
        inner: None,
    }
}

fn cms_tracker() -> Tracker {
    Tracker {
        volume: solid("tracker", 1.29, 1.99),
        material: Material::void(),
        acceptance: TrackerAcceptance::Banded {
            min_pt: 0.5,
            bands: vec![EfficiencyBand::new(1.35, 0.95), EfficiencyBand::new(2.5, 0.9)],
        },
        resolution: TrackerResolution::Constant(1.1e-2),
    }
}

fn clic_tracker() -> Tracker {
    Tracker {
        volume: solid("tracker", 2.14, 2.6),
        material: Material::void(),
        acceptance: TrackerAcceptance::Polar {
            theta_max_deg: 80.0,
            min_pt: 0.4,
            efficiency: 0.95,
        },
        resolution: TrackerResolution::AngleBinned(vec![
            AngularBin::new(10.0, 2e-5, 7.2e-4),
            AngularBin::new(20.0, 3.9e-5, 1.6e-3),
            AngularBin::new(30.0, 9.9e-5, 3.8e-3),
            AngularBin::new(80.0, 8.2e-4, 9.1e-3),
            AngularBin::new(90.0, 8.2e-2, 9.1e-2),
        ]),
    }
}

fn cms_ecal(volume: VolumeCylinder) -> Ecal {
    Ecal {
        volume,
        material: Material::new("ECAL", 8.9e-3, 0.275),
        barrel_boundary: EtaBoundary::Fixed(1.479),
        min_energy: RegionTable::new(0.3, 1.0),
        endcap_min_pt: Some(0.2),
        eta_max: 2.93,
        resolution: ResolutionModel::Regional {
            selector: RegionSelector::window(1.479, 3.0),
            terms: RegionTable::new(
                StochasticTerms::new(4.22163e-02, 1.55903e-01, 7.14166e-03),
                StochasticTerms::new(-2.08048e-01, 3.25097e-01, 7.34244e-03),
            ),
        },
        response: ResponseModel::FermiDirac {
            selector: RegionSelector::crack(1.479),
            curves: RegionTable::new(
                FermiDirac::new(1.00071, -9.04973, -2.48554),
                FermiDirac::new(9.95665e-01, -3.31774, -2.11123),
            ),
        },
        cluster_size: ClusterSize {
            electromagnetic: 0.04,
            hadronic: 0.07,
        },
    }
}

fn clic_ecal() -> Ecal {
    Ecal {
        volume: shell("ecal", 2.40, 2.85, 2.15, 2.6),
        material: Material::new("ECAL", 0.25 / 23.0, 0.25),
        barrel_boundary: EtaBoundary::InnerJunction,
        min_energy: RegionTable::uniform(0.5),
        endcap_min_pt: None,
        eta_max: 2.76,
        resolution: ResolutionModel::Uniform(StochasticTerms::new(0.167, 0.010, 0.011)),
        response: ResponseModel::Unity,
        cluster_size: ClusterSize {
            electromagnetic: 0.015,
            hadronic: 0.045,
        },
    }
}

fn hcal_calibrated_terms() -> RegionTable<StochasticTerms> {
    RegionTable::new(
        StochasticTerms::new(0.8062, 2.753, 0.1501),
        StochasticTerms::new(6.803e-06, 6.676, 0.1716),
    )
}

fn hcal_response() -> ResponseModel {
    ResponseModel::FermiDirac {
        selector: RegionSelector::crack(1.3),
        curves: RegionTable::new(
            FermiDirac::new(1.036, 4.452, -2.458),
            FermiDirac::new(1.071, 9.471, -2.823),
        ),
    }
}

fn cms_hcal(volume: VolumeCylinder) -> Hcal {
    Hcal {
        volume,
        material: Material::without_x0("HCAL", 0.17),
        resolution: ResolutionModel::Override {
            applied: StochasticTerms::new(1.1, 0.0, 0.09),
            calibrated: hcal_calibrated_terms(),
        },
        response: ResponseModel::Unity,
        cluster_size: 0.2,
        acceptance: HcalAcceptance::TurnOn(TurnOnCurves {
            central_eta_max: 1.3,
            central_min_energy: 1.0,
            central_curve: FermiDirac::new(1.0, 1.93816, -1.75330),
            endcap_eta_max: 3.0,
            endcap_min_energy: 1.1,
            endcap_split_energy: 10.0,
            endcap_low: Quadratic::new(1.05634, -1.66943e-01, 1.05997e-02),
            endcap_high: FermiDirac::new(8.09522e-01, 9.90855, -5.30366),
            forward_eta_max: 5.0,
            forward_min_energy: 7.0,
        }),
    }
}

fn clic_hcal() -> Hcal {
    Hcal {
        volume: shell("hcal", 4.3, 5.3, 1.9, 2.85),
        material: Material::new("HCAL", 0.018, 0.17),
        resolution: ResolutionModel::Uniform(StochasticTerms::new(0.60, 0.0, 0.025)),
        response: ResponseModel::Unity,
        cluster_size: 0.25,
        acceptance: HcalAcceptance::Threshold {
            eta_max: 2.76,
            min_energy: 1.0,
        },
    }
}

fn field(volume: VolumeCylinder) -> Field {
    Field {
        volume,
        material: Material::void(),
        magnitude: 2.0,
    }
}

fn beampipe() -> BeamPipe {
    BeamPipe {
        volume: shell("beampipe", 0.025 + 0.8e-3, 1.98, 0.025, 1.9785),
        material: Material::new("BeamPipe", 35.28e-2, 0.0),
    }
}

fn stochastic_electron(acceptance: ElectronAcceptance) -> ElectronModel {
    ElectronModel {
        acceptance,
        resolution: ElectronResolution::Stochastic(0.1),
    }
}

fn window_muon(resolution: MuonResolution) -> MuonModel {
    MuonModel {
        acceptance: MuonAcceptance::Window {
            min_pt: 5.0,
            max_abs_eta: 2.5,
        },
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_every_variant_validates() {
        for variant in Variant::ALL {
            let detector = variant.detector().unwrap();
            assert_eq!(detector.name(), variant.detector_name());
        }
    }

    #[test]
    fn test_parse_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
            assert_eq!(variant.detector_name().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!(
            "CMS-2T-ECAL".parse::<Variant>().unwrap(),
            Variant::Cms2TEcal
        );
        let err = "atlas".parse::<Variant>().unwrap_err();
        assert!(matches!(err, fastsim_core::Error::UnknownVariant(ref s) if s == "atlas"));
    }

    #[test]
    fn test_jet_energy_correction() {
        assert_eq!(Variant::Cms2T.config().jet_energy_correction, Some(1.1));
        assert_eq!(Variant::Cms2TEcal.config().jet_energy_correction, Some(1.1));
        assert_eq!(Variant::Cms2THcal.config().jet_energy_correction, None);
        assert_eq!(Variant::Cms2TTracker.config().jet_energy_correction, None);
    }

    #[test]
    fn test_volume_names() {
        let config = Variant::Cms2T.config();
        let ecal = &config.ecal.volume;
        assert_eq!(ecal.outer.name, "ecal_out");
        assert_eq!(ecal.inner.as_ref().unwrap().name, "ecal_in");
        assert_eq!(config.tracker.volume.outer.name, "tracker_out");
    }

    #[test]
    fn test_material_lengths() {
        let clic = Variant::Cms2TEcal.config();
        assert_relative_eq!(clic.ecal.material.x0.unwrap(), 0.25 / 23.0);
        assert_relative_eq!(clic.ecal.material.lambda_i.unwrap(), 0.25);
        let cms = Variant::Cms2T.config();
        assert_eq!(cms.hcal.material.x0, None);
        assert_eq!(cms.hcal.material.lambda_i, Some(0.17));
    }
}
