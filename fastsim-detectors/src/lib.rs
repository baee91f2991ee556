//! fastsim-detectors: Detector elements, configurations and smearing.
//!
//! This crate assembles the core formulas into concrete elements (tracker,
//! ECAL, HCAL, field, beam pipe), the detector-level electron and muon
//! parametrizations, and the four built-in detector variants.
//!
//! # Example
//!
//! ```
//! use fastsim_core::{FixedDraw, Particle};
//! use fastsim_detectors::Variant;
//!
//! let detector = Variant::Cms2T.detector().unwrap();
//! let pion = Particle::new(211, 1, 0.6, 1.0, 0.0, 0.14);
//! assert!(detector.tracker().acceptance(&pion, &mut FixedDraw(0.0)));
//! ```

pub mod acceptance;
pub mod calorimeter;
pub mod config;
pub mod detector;
pub mod ecal;
pub mod error;
pub mod hcal;
pub mod particles;
pub mod passive;
pub mod simulation;
pub mod smear;
pub mod tracker;
pub mod variants;

pub use acceptance::EfficiencyBand;
pub use calorimeter::Calorimeter;
pub use config::DetectorConfig;
pub use detector::Detector;
pub use ecal::{ClusterSize, Ecal, EtaBoundary};
pub use error::{Error, Result};
pub use hcal::{Hcal, HcalAcceptance, Quadratic, TurnOnCurves};
pub use particles::{
    ElectronAcceptance, ElectronModel, ElectronResolution, MuonAcceptance, MuonBand, MuonModel,
    MuonResolution,
};
pub use passive::{BeamPipe, Field};
pub use simulation::{simulate, simulate_particle, Measurement, Outcome, Species, Summary};
pub use smear::{smear_cluster, smear_electron, smear_muon, smear_track};
pub use tracker::{AngularBin, Tracker, TrackerAcceptance, TrackerResolution};
pub use variants::Variant;
