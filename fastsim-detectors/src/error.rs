//! Detector-level error types.

use thiserror::Error;

/// Result type for detector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Detector-level error types.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration that parses but cannot describe a detector.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Track direction outside every angular resolution bin.
    #[error("no tracker resolution bin covers theta = {theta_deg} deg")]
    NoResolutionBin { theta_deg: f64 },

    /// Muon direction outside every resolution band.
    #[error("no muon resolution band covers |eta| = {eta}")]
    NoMuonBand { eta: f64 },

    /// Invalid smearing width.
    #[error("smearing error: {0}")]
    Smearing(String),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] fastsim_core::Error),
}
