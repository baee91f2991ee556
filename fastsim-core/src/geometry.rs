//! Cylindrical placement volumes.
//!
//! Volumes here are tags: they describe where an element sits so that
//! downstream propagation code can intersect them. The only quantity derived
//! in this crate is the barrel/endcap junction pseudorapidity.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed cylinder surface centered on the interaction point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceCylinder {
    /// Surface name.
    pub name: String,
    /// Radius (meters).
    pub radius: f64,
    /// Half-length along the beam axis (meters).
    pub z: f64,
}

impl SurfaceCylinder {
    /// Creates a surface.
    pub fn new(name: impl Into<String>, radius: f64, z: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            z,
        }
    }

    /// Pseudorapidity of the corner where the barrel meets the endcap.
    #[must_use]
    pub fn eta_junction(&self) -> f64 {
        let theta = (self.radius / self.z).atan();
        -(theta / 2.0).tan().ln()
    }
}

/// A cylindrical shell between an inner and an outer surface.
///
/// The inner surface is absent for solid volumes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeCylinder {
    /// Volume name.
    pub name: String,
    /// Outer surface, named `<name>_out`.
    pub outer: SurfaceCylinder,
    /// Inner surface, named `<name>_in`.
    pub inner: Option<SurfaceCylinder>,
}

impl VolumeCylinder {
    /// Creates a volume from its outer and inner extents.
    ///
    /// The inner surface is only created when both inner extents are non-zero.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVolume`] unless the outer radius and
    /// half-length are strictly larger than the inner ones.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        z: f64,
        inner_radius: f64,
        inner_z: f64,
    ) -> Result<Self> {
        let name = name.into();
        let outer = SurfaceCylinder::new(format!("{name}_out"), radius, z);
        let inner = if inner_radius != 0.0 && inner_z != 0.0 {
            Some(SurfaceCylinder::new(format!("{name}_in"), inner_radius, inner_z))
        } else {
            None
        };
        let volume = Self { name, outer, inner };
        volume.validate()?;
        Ok(volume)
    }

    /// Creates a volume without an inner surface.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVolume`] for non-positive extents.
    pub fn solid(name: impl Into<String>, radius: f64, z: f64) -> Result<Self> {
        Self::new(name, radius, z, 0.0, 0.0)
    }

    /// Checks the extents, e.g. after deserialization.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVolume`] describing the first violated bound.
    pub fn validate(&self) -> Result<()> {
        let (inner_radius, inner_z) = self
            .inner
            .as_ref()
            .map_or((0.0, 0.0), |inner| (inner.radius, inner.z));

        let finite = [self.outer.radius, self.outer.z, inner_radius, inner_z]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(self.invalid("extents must be finite".to_string()));
        }
        if inner_radius < 0.0 || inner_z < 0.0 {
            return Err(self.invalid("inner extents must not be negative".to_string()));
        }
        if self.outer.radius <= inner_radius {
            return Err(self.invalid(format!(
                "outer radius {} must be larger than inner radius {}",
                self.outer.radius, inner_radius
            )));
        }
        if self.outer.z <= inner_z {
            return Err(self.invalid(format!(
                "outer z {} must be larger than inner z {}",
                self.outer.z, inner_z
            )));
        }
        Ok(())
    }

    /// Junction pseudorapidity of the outer surface.
    #[must_use]
    pub fn eta_junction(&self) -> f64 {
        self.outer.eta_junction()
    }

    /// Junction pseudorapidity of the inner surface, if any.
    #[must_use]
    pub fn inner_eta_junction(&self) -> Option<f64> {
        self.inner.as_ref().map(SurfaceCylinder::eta_junction)
    }

    /// Returns the surfaces of this volume, inner first.
    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceCylinder> {
        self.inner.iter().chain(std::iter::once(&self.outer))
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidVolume {
            name: self.name.clone(),
            reason,
        }
    }
}
