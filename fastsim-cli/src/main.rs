//! fastsim command-line interface.
//!
//! Inspect the built-in detector configurations, evaluate acceptance and
//! resolution for a single particle, and run seeded batch simulations.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use std::f64::consts::PI;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use fastsim_core::{Cluster, Element, Kinematics, Particle};
use fastsim_detectors::{simulate, Calorimeter, Detector, DetectorConfig, Species, Summary, Variant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("Detector error: {0}")]
    Detector(#[from] fastsim_detectors::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Built-in detector selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// CMS-like tracker and calorimeters
    #[value(name = "cms-2t")]
    Cms2T,
    /// CLIC-like ECAL
    #[value(name = "cms-2t-ecal")]
    Cms2TEcal,
    /// CLIC-like HCAL
    #[value(name = "cms-2t-hcal")]
    Cms2THcal,
    /// CLIC-like tracker
    #[value(name = "cms-2t-tracker")]
    Cms2TTracker,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Cms2T => Variant::Cms2T,
            VariantArg::Cms2TEcal => Variant::Cms2TEcal,
            VariantArg::Cms2THcal => Variant::Cms2THcal,
            VariantArg::Cms2TTracker => Variant::Cms2TTracker,
        }
    }
}

/// Parametrized detector response for fast collider simulation.
#[derive(Parser)]
#[command(name = "fastsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show elements, volumes and materials of a detector
    Info {
        /// Built-in detector variant
        #[arg(short, long, value_enum, default_value = "cms-2t")]
        variant: VariantArg,

        /// JSON configuration file (overrides --variant)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Evaluate acceptance and resolution for one particle
    Evaluate {
        /// Built-in detector variant
        #[arg(short, long, value_enum, default_value = "cms-2t")]
        variant: VariantArg,

        /// JSON configuration file (overrides --variant)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Signed PDG identifier
        #[arg(long, allow_hyphen_values = true)]
        pdg: i32,

        /// Transverse momentum (GeV)
        #[arg(long)]
        pt: f64,

        /// Pseudorapidity
        #[arg(long, allow_hyphen_values = true)]
        eta: f64,

        /// Seed for the acceptance draws
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Simulate a batch of particles and print a summary
    Simulate {
        /// Built-in detector variant
        #[arg(short, long, value_enum, default_value = "cms-2t")]
        variant: VariantArg,

        /// JSON configuration file (overrides --variant)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Signed PDG identifier
        #[arg(long, allow_hyphen_values = true)]
        pdg: i32,

        /// Number of particles
        #[arg(short = 'n', long, default_value = "10000")]
        count: usize,

        /// Minimum transverse momentum (GeV)
        #[arg(long, default_value = "1.0")]
        pt_min: f64,

        /// Maximum transverse momentum (GeV)
        #[arg(long, default_value = "100.0")]
        pt_max: f64,

        /// Particles are generated uniformly in |eta| < eta-max
        #[arg(long, default_value = "2.5")]
        eta_max: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print a built-in configuration as JSON
    DumpConfig {
        /// Built-in detector variant
        #[arg(short, long, value_enum, default_value = "cms-2t")]
        variant: VariantArg,
    },
}

fn load_detector(variant: VariantArg, config: Option<PathBuf>) -> Result<Detector> {
    let config = match config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            DetectorConfig::from_file(&path)?
        }
        None => Variant::from(variant).config(),
    };
    Ok(Detector::new(config)?)
}

/// Charge of a particle given its PDG code, for the common species.
fn charge_of(pdg_id: i32) -> i32 {
    let sign = pdg_id.signum();
    match pdg_id.abs() {
        11 | 13 | 15 => -sign,
        211 | 321 | 2212 => sign,
        _ => 0,
    }
}

/// Rest mass (GeV) for the common species, zero otherwise.
fn mass_of(pdg_id: i32) -> f64 {
    match pdg_id.abs() {
        11 => 0.000_511,
        13 => 0.105_66,
        211 => 0.139_57,
        321 => 0.493_68,
        130 | 310 => 0.497_61,
        2212 => 0.938_27,
        2112 => 0.939_57,
        _ => 0.0,
    }
}

fn make_particle(pdg_id: i32, pt: f64, eta: f64, phi: f64) -> Particle {
    Particle::new(pdg_id, charge_of(pdg_id), pt, eta, phi, mass_of(pdg_id))
}

fn print_calorimeter<C: Calorimeter>(calo: &C, particle: &Particle, rng: &mut StdRng) {
    let cluster = Cluster::from_particle(particle);
    let energy = cluster.energy;
    println!(
        "{:<9} accepted: {:<5}  resolution: {:.5}  response: {:.5}  cluster size: {:.3}",
        calo.name(),
        calo.acceptance(&cluster, rng),
        calo.energy_resolution(energy, cluster.eta),
        calo.energy_response(energy, cluster.eta),
        calo.cluster_size(particle.pdg_id)
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { variant, config } => {
            let detector = load_detector(variant, config)?;

            println!("Detector: {}", detector.name());
            println!(
                "{:<9} | {:<9} | {:>8} | {:>8} | {:>8} | {:>8} | {:<8}",
                "Element", "Material", "X0 (m)", "λI (m)", "R (m)", "z (m)", "Inner"
            );
            println!("{:-<76}", "");
            for element in detector.elements() {
                let material = element.material();
                let volume = element.volume();
                let length =
                    |value: Option<f64>| value.map_or("-".to_string(), |v| format!("{v:.4}"));
                let inner = volume
                    .inner
                    .as_ref()
                    .map_or("-".to_string(), |s| format!("{:.3}/{:.3}", s.radius, s.z));
                println!(
                    "{:<9} | {:<9} | {:>8} | {:>8} | {:>8.3} | {:>8.3} | {:<8}",
                    element.name(),
                    material.name,
                    length(material.x0),
                    length(material.lambda_i),
                    volume.outer.radius,
                    volume.outer.z,
                    inner
                );
            }

            println!();
            println!("Surfaces by radius:");
            for surface in detector.cylinders() {
                println!(
                    "  {:<12} R = {:.4}  z = {:.4}  eta junction = {:.4}",
                    surface.name,
                    surface.radius,
                    surface.z,
                    surface.eta_junction()
                );
            }

            println!();
            println!(
                "ECAL barrel boundary: |eta| = {:.4}",
                detector.ecal().eta_boundary()
            );
            println!("Field: {} T", detector.field().magnitude);
            match detector.jet_energy_correction() {
                Some(factor) => println!("Jet energy correction: {}", factor),
                None => println!("Jet energy correction: none"),
            }
        }

        Commands::Evaluate {
            variant,
            config,
            pdg,
            pt,
            eta,
            seed,
        } => {
            if pt <= 0.0 {
                return Err(CliError::InvalidArgument(format!("pt must be positive, got {}", pt)));
            }
            let detector = load_detector(variant, config)?;
            let particle = make_particle(pdg, pt, eta, 0.0);
            let species = Species::of(&particle);
            let mut rng = StdRng::seed_from_u64(seed);

            println!("Detector: {}", detector.name());
            println!(
                "Particle: pdg {} ({}), pt {:.3}, eta {:.3}, E {:.3}, theta {:.2} deg",
                pdg,
                species,
                particle.pt(),
                particle.eta(),
                particle.energy(),
                particle.theta().to_degrees()
            );

            if particle.charge() != 0 {
                let tracker = detector.tracker();
                let resolution = tracker
                    .resolution(&particle)
                    .map_or_else(|e| e.to_string(), |r| format!("{r:.5}"));
                println!(
                    "{:<9} accepted: {:<5}  resolution: {}",
                    tracker.name(),
                    tracker.acceptance(&particle, &mut rng),
                    resolution
                );
            }
            print_calorimeter(detector.ecal(), &particle, &mut rng);
            print_calorimeter(detector.hcal(), &particle, &mut rng);

            match species {
                Species::Electron => println!(
                    "{:<9} accepted: {:<5}  resolution: {:.5}",
                    "electron",
                    detector.electron_acceptance(&particle, &mut rng),
                    detector.electron_resolution(&particle)
                ),
                Species::Muon => {
                    let resolution = detector
                        .muon_resolution(&particle)
                        .map_or_else(|e| e.to_string(), |r| format!("{r:.5}"));
                    println!(
                        "{:<9} accepted: {:<5}  resolution: {}",
                        "muon",
                        detector.muon_acceptance(&particle, &mut rng),
                        resolution
                    );
                }
                _ => {}
            }
        }

        Commands::Simulate {
            variant,
            config,
            pdg,
            count,
            pt_min,
            pt_max,
            eta_max,
            seed,
        } => {
            if !(pt_min > 0.0 && pt_max > pt_min) {
                return Err(CliError::InvalidArgument(format!(
                    "need 0 < pt-min < pt-max, got {} and {}",
                    pt_min, pt_max
                )));
            }
            if eta_max <= 0.0 {
                return Err(CliError::InvalidArgument(format!(
                    "eta-max must be positive, got {}",
                    eta_max
                )));
            }
            let detector = load_detector(variant, config)?;

            log::info!(
                "Generating {} particles with pdg {} in pt [{}, {}], |eta| < {}",
                count, pdg, pt_min, pt_max, eta_max
            );
            let mut rng = StdRng::seed_from_u64(seed);
            let particles: Vec<Particle> = (0..count)
                .map(|_| {
                    let pt = rng.gen_range(pt_min..pt_max);
                    let eta = rng.gen_range(-eta_max..eta_max);
                    let phi = rng.gen_range(-PI..PI);
                    make_particle(pdg, pt, eta, phi)
                })
                .collect();

            let start = Instant::now();
            let outcomes = simulate(&detector, &particles, seed)?;
            let elapsed = start.elapsed();
            let summary = Summary::from_outcomes(&outcomes);

            println!(
                "Simulated {} particles through {} in {:.3}s",
                summary.total,
                detector.name(),
                elapsed.as_secs_f64()
            );
            for species in Species::ALL {
                let counts = summary.species(species);
                if counts.total > 0 {
                    println!(
                        "  {:<15} {:>8} generated  {:>8} detected",
                        species.as_str(),
                        counts.total,
                        counts.detected
                    );
                }
            }
            println!("Efficiency: {:.4}", summary.efficiency());
            match summary.mean_energy_ratio {
                Some(ratio) => println!("Mean measured/true energy: {:.4}", ratio),
                None => println!("Mean measured/true energy: n/a"),
            }
        }

        Commands::DumpConfig { variant } => {
            let config = Variant::from(variant).config();
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_variant_names() {
        for arg in VariantArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(Variant::from(*arg).as_str(), name);
        }
    }

    #[test]
    fn test_charges() {
        assert_eq!(charge_of(11), -1);
        assert_eq!(charge_of(-13), 1);
        assert_eq!(charge_of(-211), -1);
        assert_eq!(charge_of(22), 0);
        assert_eq!(charge_of(2112), 0);
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "fastsim",
            "simulate",
            "--variant",
            "cms-2t-tracker",
            "--pdg",
            "-211",
            "-n",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                variant, pdg, count, ..
            } => {
                assert!(matches!(variant, VariantArg::Cms2TTracker));
                assert_eq!(pdg, -211);
                assert_eq!(count, 10);
            }
            _ => panic!("expected simulate"),
        }
    }
}
