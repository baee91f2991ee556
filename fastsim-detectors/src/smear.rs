//! Gaussian smearing of true particles and clusters.
//!
//! Acceptance decisions and widths come from the detector elements; the
//! Gaussian draws use `rand_distr`.

use fastsim_core::{Cluster, Deposit, Particle};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::calorimeter::Calorimeter;
use crate::detector::Detector;
use crate::error::{Error, Result};
use crate::tracker::Tracker;

/// One draw from `N(mean, sigma)`.
fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> Result<f64> {
    let normal = Normal::new(mean, sigma)
        .map_err(|e| Error::Smearing(format!("N({mean}, {sigma}): {e}")))?;
    Ok(normal.sample(rng))
}

/// Apply a momentum scale factor; a non-positive factor loses the particle.
fn rescale(particle: &Particle, factor: f64) -> Option<Particle> {
    (factor > 0.0).then(|| particle.scaled(factor))
}

/// Smear a cluster energy with `E' = E * N(response, resolution)`.
///
/// Returns `None` for a non-positive energy or when the calorimeter does not
/// accept the smeared cluster.
///
/// # Errors
/// Returns [`Error::Smearing`] for an invalid resolution.
pub fn smear_cluster<C, R>(
    calorimeter: &C,
    cluster: &Cluster,
    rng: &mut R,
) -> Result<Option<Cluster>>
where
    C: Calorimeter,
    R: Rng + ?Sized,
{
    let energy = cluster.energy();
    if energy <= 0.0 {
        return Ok(None);
    }
    let response = calorimeter.energy_response(energy, cluster.eta());
    let resolution = calorimeter.energy_resolution(energy, cluster.eta());
    let smeared = cluster.with_energy(energy * gauss(rng, response, resolution)?);
    Ok(calorimeter.acceptance(&smeared, rng).then_some(smeared))
}

/// Reconstruct a charged track: acceptance on the true track, then
/// `pt' = pt * N(1, resolution)`.
///
/// Returns `None` when the track is not accepted or the drawn scale factor
/// is not positive.
///
/// # Errors
/// Returns an error when the tracker has no resolution for the track.
pub fn smear_track<R: Rng + ?Sized>(
    tracker: &Tracker,
    particle: &Particle,
    rng: &mut R,
) -> Result<Option<Particle>> {
    if !tracker.acceptance(particle, rng) {
        return Ok(None);
    }
    let resolution = tracker.resolution(particle)?;
    Ok(rescale(particle, gauss(rng, 1.0, resolution)?))
}

/// Reconstruct an electron with the detector-level parametrization.
///
/// # Errors
/// Returns [`Error::Smearing`] for an invalid resolution.
pub fn smear_electron<R: Rng + ?Sized>(
    detector: &Detector,
    particle: &Particle,
    rng: &mut R,
) -> Result<Option<Particle>> {
    if !detector.electron_acceptance(particle, rng) {
        return Ok(None);
    }
    let resolution = detector.electron_resolution(particle);
    Ok(rescale(particle, gauss(rng, 1.0, resolution)?))
}

/// Reconstruct a muon with the detector-level parametrization.
///
/// # Errors
/// Returns an error when no resolution applies to the muon.
pub fn smear_muon<R: Rng + ?Sized>(
    detector: &Detector,
    particle: &Particle,
    rng: &mut R,
) -> Result<Option<Particle>> {
    if !detector.muon_acceptance(particle, rng) {
        return Ok(None);
    }
    let resolution = detector.muon_resolution(particle)?;
    Ok(rescale(particle, gauss(rng, 1.0, resolution)?))
}
