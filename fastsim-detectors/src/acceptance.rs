//! Pseudorapidity bands with a fixed detection efficiency.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Objects with `|eta| < max_abs_eta` are detected with `efficiency`,
/// unless an earlier band already matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyBand {
    /// Upper |eta| bound (exclusive).
    pub max_abs_eta: f64,
    /// Detection probability inside the band.
    pub efficiency: f64,
}

impl EfficiencyBand {
    /// Creates a band.
    pub const fn new(max_abs_eta: f64, efficiency: f64) -> Self {
        Self {
            max_abs_eta,
            efficiency,
        }
    }
}

/// Efficiency of the first band containing `eta`.
#[inline]
pub fn band_efficiency(bands: &[EfficiencyBand], eta: f64) -> Option<f64> {
    let eta = eta.abs();
    bands
        .iter()
        .find(|band| eta < band.max_abs_eta)
        .map(|band| band.efficiency)
}

/// Checks that a probability lies in `[0, 1]`.
pub(crate) fn check_probability(what: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{what} must be a probability in [0, 1], got {value}")))
    }
}

/// Checks a band list: non-empty, increasing bounds, valid efficiencies.
pub(crate) fn check_bands(what: &str, bands: &[EfficiencyBand]) -> Result<()> {
    if bands.is_empty() {
        return Err(Error::ConfigError(format!("{what} has no eta bands")));
    }
    for pair in bands.windows(2) {
        if pair[1].max_abs_eta <= pair[0].max_abs_eta {
            return Err(Error::ConfigError(format!(
                "{what} eta bands must increase, got {} after {}",
                pair[1].max_abs_eta, pair[0].max_abs_eta
            )));
        }
    }
    for band in bands {
        check_probability(what, band.efficiency)?;
    }
    Ok(())
}
