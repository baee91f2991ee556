//! Kinematic views of the objects handed to detector elements.
//!
//! Detector formulas only read a handful of quantities, so they are written
//! against the [`Kinematics`] and [`Deposit`] traits. [`Particle`] and
//! [`Cluster`] are minimal implementations for callers without their own
//! event model.

use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PDG code of the photon.
pub const PDG_PHOTON: i32 = 22;
/// PDG code of the electron.
pub const PDG_ELECTRON: i32 = 11;
/// PDG code of the muon.
pub const PDG_MUON: i32 = 13;

/// Polar angle (from the beam axis) of a pseudorapidity.
#[inline]
pub fn polar_angle(eta: f64) -> f64 {
    2.0 * (-eta).exp().atan()
}

/// Trait for true or reconstructed particle kinematics.
///
/// Energies and momenta are in GeV.
pub trait Kinematics {
    /// Transverse momentum.
    fn pt(&self) -> f64;

    /// Pseudorapidity.
    fn eta(&self) -> f64;

    /// Azimuthal angle.
    fn phi(&self) -> f64;

    /// Total energy.
    fn energy(&self) -> f64;

    /// Signed PDG identifier.
    fn pdg_id(&self) -> i32;

    /// Electric charge in units of e.
    fn charge(&self) -> i32;

    /// Magnitude of the 3-momentum.
    #[inline]
    fn momentum(&self) -> f64 {
        self.pt() * self.eta().cosh()
    }

    /// Angle from the transverse plane: zero at `eta = 0`, `pi/2` along the beam.
    #[inline]
    fn theta(&self) -> f64 {
        FRAC_PI_2 - polar_angle(self.eta())
    }
}

/// Trait for energy deposits in a calorimeter.
pub trait Deposit {
    /// Deposited energy.
    fn energy(&self) -> f64;

    /// Pseudorapidity of the deposit position.
    fn eta(&self) -> f64;

    /// Transverse energy of the deposit.
    #[inline]
    fn pt(&self) -> f64 {
        self.energy() / self.eta().cosh()
    }
}

/// A particle described by `(pt, eta, phi, mass)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Signed PDG identifier.
    pub pdg_id: i32,
    /// Electric charge.
    pub charge: i32,
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle.
    pub phi: f64,
    /// Rest mass.
    pub mass: f64,
}

impl Particle {
    /// Creates a particle.
    pub fn new(pdg_id: i32, charge: i32, pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        Self {
            pdg_id,
            charge,
            pt,
            eta,
            phi,
            mass,
        }
    }

    /// Creates a massless neutral particle.
    pub fn massless(pdg_id: i32, pt: f64, eta: f64) -> Self {
        Self::new(pdg_id, 0, pt, eta, 0.0, 0.0)
    }

    /// Returns a copy with the 3-momentum scaled by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            pt: self.pt * factor,
            ..*self
        }
    }
}

impl Kinematics for Particle {
    #[inline]
    fn pt(&self) -> f64 {
        self.pt
    }

    #[inline]
    fn eta(&self) -> f64 {
        self.eta
    }

    #[inline]
    fn phi(&self) -> f64 {
        self.phi
    }

    #[inline]
    fn energy(&self) -> f64 {
        let p = self.momentum();
        (p * p + self.mass * self.mass).sqrt()
    }

    #[inline]
    fn pdg_id(&self) -> i32 {
        self.pdg_id
    }

    #[inline]
    fn charge(&self) -> i32 {
        self.charge
    }
}

/// A calorimeter cluster located by its pseudorapidity and azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Deposited energy.
    pub energy: f64,
    /// Position pseudorapidity.
    pub eta: f64,
    /// Position azimuth.
    pub phi: f64,
}

impl Cluster {
    /// Creates a cluster.
    pub fn new(energy: f64, eta: f64, phi: f64) -> Self {
        Self { energy, eta, phi }
    }

    /// Cluster left by a particle depositing all of its energy.
    pub fn from_particle<K: Kinematics + ?Sized>(particle: &K) -> Self {
        Self::new(particle.energy(), particle.eta(), particle.phi())
    }

    /// Returns a copy with a different energy at the same position.
    #[must_use]
    pub fn with_energy(&self, energy: f64) -> Self {
        Self { energy, ..*self }
    }
}

impl Deposit for Cluster {
    #[inline]
    fn energy(&self) -> f64 {
        self.energy
    }

    #[inline]
    fn eta(&self) -> f64 {
        self.eta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_theta_zero_at_central_eta() {
        let particle = Particle::massless(PDG_PHOTON, 10.0, 0.0);
        assert_relative_eq!(particle.theta(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_theta_from_eta() {
        // theta = atan(sinh(eta)) when measured from the transverse plane
        for eta in [-2.5, -0.7, 0.3, 1.0, 3.2] {
            let particle = Particle::massless(PDG_PHOTON, 10.0, eta);
            assert_relative_eq!(particle.theta(), eta.sinh().atan(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_momentum_and_energy() {
        let muon = Particle::new(PDG_MUON, -1, 20.0, 1.0, 0.5, 0.105_658);
        let p = 20.0 * 1.0_f64.cosh();
        assert_relative_eq!(muon.momentum(), p, epsilon = 1e-12);
        assert_relative_eq!(
            muon.energy(),
            (p * p + 0.105_658_f64.powi(2)).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_scaled_particle_keeps_direction() {
        let particle = Particle::new(211, 1, 5.0, -1.2, 2.0, 0.139_57);
        let scaled = particle.scaled(1.1);
        assert_relative_eq!(scaled.pt, 5.5);
        assert_relative_eq!(scaled.eta, -1.2);
        assert_eq!(scaled.charge, 1);
    }

    #[test]
    fn test_cluster_pt() {
        let cluster = Cluster::new(10.0, 2.0, 0.0);
        assert_relative_eq!(cluster.pt(), 10.0 / 2.0_f64.cosh(), epsilon = 1e-12);
        assert_relative_eq!(cluster.with_energy(5.0).pt(), 5.0 / 2.0_f64.cosh());
    }

    #[test]
    fn test_cluster_from_massless_particle() {
        let photon = Particle::massless(PDG_PHOTON, 3.0, 0.0);
        let cluster = Cluster::from_particle(&photon);
        assert_relative_eq!(cluster.energy, 3.0, epsilon = 1e-12);
        assert_relative_eq!(cluster.pt(), 3.0, epsilon = 1e-12);
    }
}
