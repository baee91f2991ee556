//! Batch simulation of true particles through a detector.
//!
//! Every particle is routed by species: photons to the ECAL, neutral hadrons
//! to the HCAL, charged hadrons to the tracker, electrons and muons to the
//! detector-level models. Each particle draws from its own generator seeded
//! from `(seed, index)`, so results do not depend on the thread count.

use std::fmt;

use fastsim_core::kinematics::{PDG_ELECTRON, PDG_MUON, PDG_PHOTON};
use fastsim_core::{Cluster, ElementKind, Kinematics, Particle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::detector::Detector;
use crate::error::Result;
use crate::smear::{smear_cluster, smear_electron, smear_muon, smear_track};

/// Charged hadrons below this transverse momentum curl up before the
/// calorimeters.
pub const LOOPER_MAX_PT: f64 = 0.2;

/// Golden-ratio increment used to decorrelate per-particle seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Particle category driving the simulation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Photon,
    Electron,
    Muon,
    Neutrino,
    /// Charged hadron too soft to leave the tracker.
    Looper,
    ChargedHadron,
    NeutralHadron,
    Other,
}

impl Species {
    pub const ALL: [Self; 8] = [
        Self::Photon,
        Self::Electron,
        Self::Muon,
        Self::Neutrino,
        Self::Looper,
        Self::ChargedHadron,
        Self::NeutralHadron,
        Self::Other,
    ];

    /// Classify a particle from its PDG code, charge and transverse momentum.
    pub fn classify(pdg_id: i32, charge: i32, pt: f64) -> Self {
        match pdg_id.abs() {
            PDG_PHOTON => Self::Photon,
            PDG_ELECTRON => Self::Electron,
            PDG_MUON => Self::Muon,
            12 | 14 | 16 => Self::Neutrino,
            code if code > 100 => match charge {
                0 => Self::NeutralHadron,
                _ if pt < LOOPER_MAX_PT => Self::Looper,
                _ => Self::ChargedHadron,
            },
            _ => Self::Other,
        }
    }

    /// Classify any particle.
    pub fn of<K: Kinematics + ?Sized>(particle: &K) -> Self {
        Self::classify(particle.pdg_id(), particle.charge(), particle.pt())
    }

    /// Whether the species has a simulation path.
    pub fn is_simulated(&self) -> bool {
        matches!(
            self,
            Self::Photon | Self::Electron | Self::Muon | Self::ChargedHadron | Self::NeutralHadron
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photon => "photon",
            Self::Electron => "electron",
            Self::Muon => "muon",
            Self::Neutrino => "neutrino",
            Self::Looper => "looper",
            Self::ChargedHadron => "charged hadron",
            Self::NeutralHadron => "neutral hadron",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the detector recorded for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Calorimeter cluster.
    Cluster { element: ElementKind, cluster: Cluster },
    /// Reconstructed charged track.
    Track(Particle),
    /// Detector-level electron.
    Electron(Particle),
    /// Detector-level muon.
    Muon(Particle),
}

impl Measurement {
    /// Measured energy.
    pub fn energy(&self) -> f64 {
        match self {
            Self::Cluster { cluster, .. } => cluster.energy,
            Self::Track(p) | Self::Electron(p) | Self::Muon(p) => p.energy(),
        }
    }
}

/// Result of simulating one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub truth: Particle,
    pub species: Species,
    /// `None` when the particle was not simulated or not detected.
    pub measurement: Option<Measurement>,
}

impl Outcome {
    pub fn is_detected(&self) -> bool {
        self.measurement.is_some()
    }

    /// Measured over true energy, for detected particles.
    pub fn energy_ratio(&self) -> Option<f64> {
        self.measurement
            .map(|measurement| measurement.energy() / self.truth.energy())
    }
}

/// Simulate one particle with its own generator.
///
/// # Errors
/// Returns the smearing error of the element that handled the particle.
pub fn simulate_particle<R: rand::Rng + ?Sized>(
    detector: &Detector,
    particle: &Particle,
    rng: &mut R,
) -> Result<Outcome> {
    let species = Species::of(particle);
    let measurement = match species {
        Species::Photon => smear_cluster(detector.ecal(), &Cluster::from_particle(particle), rng)?
            .map(|cluster| Measurement::Cluster {
                element: ElementKind::Ecal,
                cluster,
            }),
        Species::NeutralHadron => {
            smear_cluster(detector.hcal(), &Cluster::from_particle(particle), rng)?.map(
                |cluster| Measurement::Cluster {
                    element: ElementKind::Hcal,
                    cluster,
                },
            )
        }
        Species::ChargedHadron => {
            smear_track(detector.tracker(), particle, rng)?.map(Measurement::Track)
        }
        Species::Electron => smear_electron(detector, particle, rng)?.map(Measurement::Electron),
        Species::Muon => smear_muon(detector, particle, rng)?.map(Measurement::Muon),
        Species::Neutrino | Species::Looper | Species::Other => None,
    };
    Ok(Outcome {
        truth: *particle,
        species,
        measurement,
    })
}

/// Seed of the generator used for the particle at `index`.
#[inline]
pub fn particle_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(SEED_STRIDE)
}

/// Simulate a batch of particles in parallel.
///
/// The outcome at position `i` belongs to `particles[i]`.
///
/// # Errors
/// Returns the first smearing error encountered.
pub fn simulate(detector: &Detector, particles: &[Particle], seed: u64) -> Result<Vec<Outcome>> {
    log::debug!(
        "simulating {} particles through {} (seed {seed})",
        particles.len(),
        detector.name()
    );
    particles
        .par_iter()
        .enumerate()
        .map(|(index, particle)| {
            let mut rng = StdRng::seed_from_u64(particle_seed(seed, index));
            simulate_particle(detector, particle, &mut rng)
        })
        .collect()
}

/// Per-species counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeciesCount {
    pub total: usize,
    pub detected: usize,
}

/// Aggregate statistics of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    /// Particles with a simulation path.
    pub simulated: usize,
    pub detected: usize,
    /// Counters indexed like [`Species::ALL`].
    pub by_species: [SpeciesCount; 8],
    /// Mean measured over true energy of the detected particles.
    pub mean_energy_ratio: Option<f64>,
}

impl Summary {
    /// Summarize a batch of outcomes.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        let mut ratio_sum = 0.0;
        for outcome in outcomes {
            let slot = Species::ALL
                .iter()
                .position(|species| *species == outcome.species)
                .unwrap_or(Species::ALL.len() - 1);
            summary.by_species[slot].total += 1;
            if outcome.species.is_simulated() {
                summary.simulated += 1;
            }
            if let Some(ratio) = outcome.energy_ratio() {
                summary.detected += 1;
                summary.by_species[slot].detected += 1;
                ratio_sum += ratio;
            }
        }
        if summary.detected > 0 {
            summary.mean_energy_ratio = Some(ratio_sum / summary.detected as f64);
        }
        summary
    }

    /// Detected fraction of the simulated particles.
    #[allow(clippy::cast_precision_loss)]
    pub fn efficiency(&self) -> f64 {
        if self.simulated == 0 {
            0.0
        } else {
            self.detected as f64 / self.simulated as f64
        }
    }

    /// Counters for one species.
    pub fn species(&self, species: Species) -> SpeciesCount {
        Species::ALL
            .iter()
            .position(|s| *s == species)
            .map(|slot| self.by_species[slot])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::variants::Variant;

    #[test]
    fn test_classify() {
        assert_eq!(Species::classify(22, 0, 5.0), Species::Photon);
        assert_eq!(Species::classify(-11, 1, 5.0), Species::Electron);
        assert_eq!(Species::classify(13, -1, 5.0), Species::Muon);
        assert_eq!(Species::classify(-14, 0, 5.0), Species::Neutrino);
        assert_eq!(Species::classify(211, 1, 0.1), Species::Looper);
        assert_eq!(Species::classify(-211, -1, 0.2), Species::ChargedHadron);
        assert_eq!(Species::classify(130, 0, 0.1), Species::NeutralHadron);
        assert_eq!(Species::classify(2112, 0, 10.0), Species::NeutralHadron);
        assert_eq!(Species::classify(15, -1, 10.0), Species::Other);
    }

    #[test]
    fn test_unsimulated_species_have_no_measurement() {
        let detector = Variant::Cms2T.detector().unwrap();
        let particles = [
            Particle::massless(12, 50.0, 0.0),
            Particle::new(211, 1, 0.1, 0.0, 0.0, 0.139_57),
        ];
        let outcomes = simulate(&detector, &particles, 1).unwrap();
        assert!(outcomes.iter().all(|o| o.measurement.is_none()));
        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(summary.simulated, 0);
        assert_eq!(summary.efficiency(), 0.0);
        assert_eq!(summary.mean_energy_ratio, None);
    }

    #[test]
    fn test_routing() {
        let detector = Variant::Cms2T.detector().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let photon = Particle::massless(22, 50.0, 0.5);
        let outcome = simulate_particle(&detector, &photon, &mut rng).unwrap();
        assert!(matches!(
            outcome.measurement,
            Some(Measurement::Cluster {
                element: ElementKind::Ecal,
                ..
            })
        ));

        let muon = Particle::new(13, -1, 50.0, 0.3, 0.0, 0.105_66);
        // one draw below 0.95 is needed; retry a few generators
        let detected = (0..5).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            matches!(
                simulate_particle(&detector, &muon, &mut rng).unwrap().measurement,
                Some(Measurement::Muon(_))
            )
        });
        assert!(detected);
    }

    #[test]
    fn test_summary_counts() {
        let detector = Variant::Cms2THcal.detector().unwrap();
        let particles: Vec<_> = (0..50)
            .map(|i| Particle::massless(22, 20.0 + f64::from(i), 0.1))
            .chain((0..10).map(|_| Particle::massless(16, 10.0, 0.0)))
            .collect();
        let outcomes = simulate(&detector, &particles, 3).unwrap();
        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 60);
        assert_eq!(summary.simulated, 50);
        assert_eq!(summary.species(Species::Neutrino).total, 10);
        assert_eq!(summary.species(Species::Photon).detected, 50);
        assert!((summary.efficiency() - 1.0).abs() < f64::EPSILON);
        let ratio = summary.mean_energy_ratio.unwrap();
        assert!((ratio - 1.0).abs() < 0.05, "{ratio}");
    }
}
