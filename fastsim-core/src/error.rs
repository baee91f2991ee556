//! Error types for fastsim-core.

use thiserror::Error;

/// Result type alias for fastsim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for fastsim operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Cylinder extents that cannot describe a volume.
    #[error("invalid volume '{name}': {reason}")]
    InvalidVolume { name: String, reason: String },

    /// Parameter outside of its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Lookup of an element name the detector does not own.
    #[error("unknown detector element: {0}")]
    UnknownElement(String),

    /// Lookup of a configuration variant that does not exist.
    #[error("unknown detector variant: {0}")]
    UnknownVariant(String),
}
