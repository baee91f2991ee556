//! Serializable description of a whole detector.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ecal::Ecal;
use crate::error::{Error, Result};
use crate::hcal::Hcal;
use crate::particles::{ElectronModel, MuonModel};
use crate::passive::{BeamPipe, Field};
use crate::tracker::Tracker;
use crate::variants::Variant;

/// Detector configuration: the five elements plus the detector-level
/// electron, muon and jet parametrizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Configuration name, e.g. `CMS_2T`.
    pub name: String,
    pub tracker: Tracker,
    pub ecal: Ecal,
    pub hcal: Hcal,
    pub field: Field,
    pub beampipe: BeamPipe,
    pub electron: ElectronModel,
    pub muon: MuonModel,
    /// Multiplicative jet energy correction, absent when not calibrated.
    #[serde(default)]
    pub jet_energy_correction: Option<f64>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Variant::Cms2T.config()
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file.
    ///
    /// The configuration is validated before it is returned.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes an invalid detector.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or an invalid detector.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every element and model.
    ///
    /// Called automatically when loading from JSON and by
    /// [`Detector::new`](crate::Detector::new).
    ///
    /// # Errors
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<()> {
        self.tracker.validate()?;
        self.ecal.validate()?;
        self.hcal.validate()?;
        self.field.validate()?;
        self.beampipe.volume.validate()?;
        self.electron.validate()?;
        self.muon.validate()?;
        if let Some(correction) = self.jet_energy_correction {
            if !(correction.is_finite() && correction > 0.0) {
                return Err(Error::ConfigError(format!(
                    "jet energy correction must be positive, got {correction}"
                )));
            }
        }
        Ok(())
    }
}
