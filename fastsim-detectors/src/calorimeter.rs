//! Interface shared by the electromagnetic and hadronic calorimeters.

use fastsim_core::{Deposit, Element, UniformSource};

/// Trait for calorimeter elements.
///
/// Resolution and response formulas divide by the energy; callers must pass
/// `energy > 0`.
pub trait Calorimeter: Element {
    /// Relative energy resolution for a deposit of `energy` at `eta`.
    fn energy_resolution(&self, energy: f64, eta: f64) -> f64;

    /// Multiplicative bias applied to the true energy before smearing.
    fn energy_response(&self, energy: f64, eta: f64) -> f64;

    /// Characteristic cluster size for a particle species.
    fn cluster_size(&self, pdg_id: i32) -> f64;

    /// Decides whether a cluster is detected.
    fn acceptance<D, U>(&self, cluster: &D, rng: &mut U) -> bool
    where
        D: Deposit + ?Sized,
        U: UniformSource + ?Sized;
}
