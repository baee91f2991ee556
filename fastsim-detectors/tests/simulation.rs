use fastsim_core::Particle;
use fastsim_detectors::{simulate, Species, Summary, Variant};

fn sample_particles() -> Vec<Particle> {
    let mut particles = Vec::new();
    for i in 0..200 {
        let eta = -2.4 + 0.024 * f64::from(i);
        let pt = 1.0 + 0.5 * f64::from(i % 40);
        particles.push(Particle::massless(22, pt, eta));
        particles.push(Particle::new(211, 1, pt, eta, 0.0, 0.13957));
        particles.push(Particle::new(2112, 0, pt, eta, 0.0, 0.93957));
        particles.push(Particle::new(11, -1, pt + 10.0, eta, 0.0, 0.000511));
        particles.push(Particle::new(13, 1, pt + 10.0, eta, 0.0, 0.10566));
    }
    particles
}

#[test]
fn test_same_seed_same_outcomes() {
    let particles = sample_particles();
    for variant in Variant::ALL {
        let detector = variant.detector().unwrap();
        let first = simulate(&detector, &particles, 2024).unwrap();
        let second = simulate(&detector, &particles, 2024).unwrap();
        assert_eq!(first, second, "{variant}");
        assert_eq!(first.len(), particles.len());
    }
}

#[test]
fn test_thread_count_does_not_change_outcomes() {
    let particles = sample_particles();
    let detector = Variant::Cms2T.detector().unwrap();
    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| simulate(&detector, &particles, 31).unwrap())
    };
    let single = run(1);
    let many = run(8);
    assert_eq!(single.len(), particles.len());
    assert_eq!(single, many);
}

#[test]
fn test_outcomes_follow_input_order() {
    let particles = sample_particles();
    let detector = Variant::Cms2T.detector().unwrap();
    let outcomes = simulate(&detector, &particles, 7).unwrap();
    for (particle, outcome) in particles.iter().zip(&outcomes) {
        assert_eq!(outcome.truth, *particle);
        assert_eq!(outcome.species, Species::of(particle));
    }
}

#[test]
fn test_different_seeds_differ() {
    let particles = sample_particles();
    let detector = Variant::Cms2T.detector().unwrap();
    let first = simulate(&detector, &particles, 1).unwrap();
    let second = simulate(&detector, &particles, 2).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_summary_of_mixed_batch() {
    let particles = sample_particles();
    let detector = Variant::Cms2TEcal.detector().unwrap();
    let outcomes = simulate(&detector, &particles, 99).unwrap();
    let summary = Summary::from_outcomes(&outcomes);
    assert_eq!(summary.total, 1000);
    assert_eq!(summary.simulated, 1000);
    for species in [
        Species::Photon,
        Species::ChargedHadron,
        Species::NeutralHadron,
        Species::Electron,
        Species::Muon,
    ] {
        assert_eq!(summary.species(species).total, 200);
    }
    let efficiency = summary.efficiency();
    assert!(efficiency > 0.5 && efficiency <= 1.0, "{efficiency}");
}
