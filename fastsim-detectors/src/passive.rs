//! Elements without a measurement: the solenoid field and the beam pipe.

use fastsim_core::{Element, ElementKind, Material, VolumeCylinder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Uniform solenoid field filling its volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub volume: VolumeCylinder,
    pub material: Material,
    /// Field strength in tesla.
    pub magnitude: f64,
}

impl Field {
    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns an error for an invalid volume or a non-finite magnitude.
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;
        if !self.magnitude.is_finite() {
            return Err(fastsim_core::Error::InvalidParameter(format!(
                "field magnitude must be finite, got {}",
                self.magnitude
            ))
            .into());
        }
        Ok(())
    }
}

impl Element for Field {
    fn kind(&self) -> ElementKind {
        ElementKind::Field
    }

    fn volume(&self) -> &VolumeCylinder {
        &self.volume
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// Beam pipe shell around the interaction point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamPipe {
    pub volume: VolumeCylinder,
    pub material: Material,
}

impl BeamPipe {
    /// Wall thickness, zero for a solid pipe.
    pub fn thickness(&self) -> f64 {
        self.volume
            .inner
            .as_ref()
            .map_or(0.0, |inner| self.volume.outer.radius - inner.radius)
    }
}

impl Element for BeamPipe {
    fn kind(&self) -> ElementKind {
        ElementKind::BeamPipe
    }

    fn volume(&self) -> &VolumeCylinder {
        &self.volume
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
