//! Detector element naming and the common element interface.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::VolumeCylinder;
use crate::material::Material;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed set of elements every detector owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    /// Inner tracking system.
    Tracker,
    /// Electromagnetic calorimeter.
    Ecal,
    /// Hadronic calorimeter.
    Hcal,
    /// Solenoid field region.
    Field,
    /// Beam pipe.
    BeamPipe,
}

impl ElementKind {
    /// All kinds in registration order.
    pub const ALL: [Self; 5] = [
        Self::Tracker,
        Self::Ecal,
        Self::Hcal,
        Self::Field,
        Self::BeamPipe,
    ];

    /// Element name used for lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tracker => "tracker",
            Self::Ecal => "ecal",
            Self::Hcal => "hcal",
            Self::Field => "field",
            Self::BeamPipe => "beampipe",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownElement(s.to_string()))
    }
}

/// Trait shared by every detector element.
///
/// An element is a named volume filled with a material; acceptance and
/// resolution live on the concrete element types.
pub trait Element: Send + Sync {
    /// Which element this is.
    fn kind(&self) -> ElementKind;

    /// Placement volume.
    fn volume(&self) -> &VolumeCylinder;

    /// Filling material.
    fn material(&self) -> &Material;

    /// Element name.
    #[inline]
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.as_str().parse::<ElementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "muon_chambers".parse::<ElementKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownElement(ref name) if name == "muon_chambers"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementKind::BeamPipe.to_string(), "beampipe");
    }
}
