//! Electromagnetic calorimeter.

use fastsim_core::kinematics::{PDG_ELECTRON, PDG_PHOTON};
use fastsim_core::{
    Deposit, Element, ElementKind, Material, RegionTable, ResolutionModel, ResponseModel,
    UniformSource, VolumeCylinder,
};
use serde::{Deserialize, Serialize};

use crate::calorimeter::Calorimeter;
use crate::error::{Error, Result};

/// Where the barrel ends for acceptance purposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaBoundary {
    /// Fixed |eta| value.
    Fixed(f64),
    /// Junction of the inner surface of the ECAL volume.
    InnerJunction,
}

/// Cluster sizes by shower type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSize {
    /// Photons and electrons.
    pub electromagnetic: f64,
    /// Everything else.
    pub hadronic: f64,
}

/// Electromagnetic calorimeter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecal {
    pub volume: VolumeCylinder,
    pub material: Material,
    /// Barrel/endcap boundary used by the acceptance.
    pub barrel_boundary: EtaBoundary,
    /// Energy thresholds (GeV), exclusive.
    pub min_energy: RegionTable<f64>,
    /// Extra transverse-energy threshold in the endcap, exclusive.
    #[serde(default)]
    pub endcap_min_pt: Option<f64>,
    /// Clusters at or beyond this |eta| are never seen.
    pub eta_max: f64,
    pub resolution: ResolutionModel,
    pub response: ResponseModel,
    pub cluster_size: ClusterSize,
}

impl Ecal {
    /// Barrel/endcap boundary in |eta|.
    pub fn eta_boundary(&self) -> f64 {
        match self.barrel_boundary {
            EtaBoundary::Fixed(eta) => eta,
            EtaBoundary::InnerJunction => self
                .volume
                .inner_eta_junction()
                .unwrap_or_else(|| self.volume.eta_junction()),
        }
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for an invalid volume, an inner-junction boundary on
    /// a solid volume, or an acceptance window ending inside the barrel.
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;
        if self.barrel_boundary == EtaBoundary::InnerJunction && self.volume.inner.is_none() {
            return Err(Error::ConfigError(
                "ecal boundary uses the inner junction but the volume has no inner surface"
                    .to_string(),
            ));
        }
        let boundary = self.eta_boundary();
        if self.eta_max <= boundary {
            return Err(Error::ConfigError(format!(
                "ecal eta_max {} must lie beyond the barrel boundary {boundary}",
                self.eta_max
            )));
        }
        Ok(())
    }
}

impl Element for Ecal {
    fn kind(&self) -> ElementKind {
        ElementKind::Ecal
    }

    fn volume(&self) -> &VolumeCylinder {
        &self.volume
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

impl Calorimeter for Ecal {
    #[inline]
    fn energy_resolution(&self, energy: f64, eta: f64) -> f64 {
        self.resolution.relative(energy, eta)
    }

    #[inline]
    fn energy_response(&self, energy: f64, eta: f64) -> f64 {
        self.response.response(energy, eta)
    }

    fn cluster_size(&self, pdg_id: i32) -> f64 {
        match pdg_id.abs() {
            PDG_PHOTON | PDG_ELECTRON => self.cluster_size.electromagnetic,
            _ => self.cluster_size.hadronic,
        }
    }

    fn acceptance<D, U>(&self, cluster: &D, _rng: &mut U) -> bool
    where
        D: Deposit + ?Sized,
        U: UniformSource + ?Sized,
    {
        let energy = cluster.energy();
        let eta = cluster.eta().abs();
        if eta < self.eta_boundary() {
            energy > self.min_energy.barrel
        } else if eta < self.eta_max {
            energy > self.min_energy.endcap
                && self.endcap_min_pt.map_or(true, |min_pt| cluster.pt() > min_pt)
        } else {
            false
        }
    }
}
