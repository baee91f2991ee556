//! fastsim-core: Core types for parametrized detector response.
//!
//! This crate provides the building blocks shared by every detector
//! configuration: materials, cylindrical volumes, barrel/endcap region
//! tables, closed-form resolution and response formulas, kinematic traits
//! and the injected uniform random source.
//!

pub mod element;
pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod material;
pub mod random;
pub mod region;
pub mod response;

pub use element::{Element, ElementKind};
pub use error::{Error, Result};
pub use geometry::{SurfaceCylinder, VolumeCylinder};
pub use kinematics::{Cluster, Deposit, Kinematics, Particle};
pub use material::Material;
pub use random::{coin_flip, FixedDraw, UniformSource};
pub use region::{Region, RegionSelector, RegionTable};
pub use response::{FermiDirac, ResolutionModel, ResponseModel, StochasticTerms};
