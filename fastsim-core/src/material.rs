//! Materials filling detector volumes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the massless placeholder material.
pub const VOID_NAME: &str = "void";

/// A named substance with its radiation and interaction lengths (meters).
///
/// `None` marks a length that is not modeled and must not be used for
/// energy-loss computations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Material name.
    pub name: String,
    /// Radiation length X0.
    pub x0: Option<f64>,
    /// Nuclear interaction length.
    pub lambda_i: Option<f64>,
}

impl Material {
    /// Creates a material with both lengths modeled.
    pub fn new(name: impl Into<String>, x0: f64, lambda_i: f64) -> Self {
        Self {
            name: name.into(),
            x0: Some(x0),
            lambda_i: Some(lambda_i),
        }
    }

    /// Creates a material whose radiation length is not modeled.
    pub fn without_x0(name: impl Into<String>, lambda_i: f64) -> Self {
        Self {
            name: name.into(),
            x0: None,
            lambda_i: Some(lambda_i),
        }
    }

    /// The void sentinel: no material effect at all.
    pub fn void() -> Self {
        Self::new(VOID_NAME, 0.0, 0.0)
    }

    /// Returns true for the void sentinel.
    pub fn is_void(&self) -> bool {
        self.name == VOID_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_material() {
        let void = Material::void();
        assert!(void.is_void());
        assert_eq!(void.x0, Some(0.0));
        assert_eq!(void.lambda_i, Some(0.0));
    }

    #[test]
    fn test_unmodeled_radiation_length() {
        let hcal = Material::without_x0("HCAL", 0.17);
        assert!(!hcal.is_void());
        assert!(hcal.x0.is_none());
        assert_eq!(hcal.lambda_i, Some(0.17));
    }
}
