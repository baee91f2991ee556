#![allow(clippy::unreadable_literal, clippy::float_cmp)]
use approx::assert_relative_eq;
use fastsim_core::{FixedDraw, Particle};
use fastsim_detectors::{Calorimeter, Variant};

#[test]
fn test_each_variant_exposes_five_elements() {
    for variant in Variant::ALL {
        let detector = variant.detector().unwrap();
        let mut names = detector.element_names().to_vec();
        names.sort_unstable();
        assert_eq!(names, ["beampipe", "ecal", "field", "hcal", "tracker"]);
        for name in names {
            let element = detector.element(name).unwrap();
            assert_eq!(element.name(), name);
            assert!(element.volume().validate().is_ok());
        }
    }
}

#[test]
fn test_cms_tracker_draw_at_eta_one() {
    let detector = Variant::Cms2T.detector().unwrap();
    let track = Particle::new(211, 1, 0.6, 1.0, 0.0, 0.13957);
    assert!(detector.tracker().acceptance(&track, &mut FixedDraw(0.0)));
    assert!(!detector.tracker().acceptance(&track, &mut FixedDraw(0.99)));
}

#[test]
fn test_clic_tracker_bins() {
    let detector = Variant::Cms2TTracker.detector().unwrap();
    let table = &detector.tracker().resolution;
    let cases = [(15.0, 20.0), (10.0, 20.0), (20.0, 30.0), (30.0, 80.0), (80.0, 90.0)];
    for (theta, threshold) in cases {
        assert_eq!(
            table.bin(theta).unwrap().max_theta_deg,
            threshold,
            "{theta}"
        );
    }
    assert!(table.bin(90.0).is_none());
}

#[test]
fn test_hcal_edges() {
    for variant in Variant::ALL {
        let detector = variant.detector().unwrap();
        let hcal = detector.hcal();
        let far = fastsim_core::Cluster::new(500.0, 6.0, 0.0);
        let soft = fastsim_core::Cluster::new(0.5, 0.5, 0.0);
        for draw in [0.0, 0.5, 0.999] {
            assert!(!hcal.acceptance(&far, &mut FixedDraw(draw)), "{variant}");
            assert!(!hcal.acceptance(&soft, &mut FixedDraw(draw)), "{variant}");
        }
    }
}

#[test]
fn test_calorimeter_resolution_is_quadrature_sum() {
    for variant in Variant::ALL {
        let detector = variant.detector().unwrap();
        for eta in [0.0, 1.2, 2.2] {
            for energy in [2.0, 20.0, 200.0] {
                let terms = detector.ecal().resolution.terms(eta);
                let expected = (terms.stochastic.powi(2) / energy
                    + terms.noise.powi(2) / energy.powi(2)
                    + terms.constant.powi(2))
                .sqrt();
                assert_relative_eq!(
                    detector.ecal().energy_resolution(energy, eta),
                    expected,
                    max_relative = 1e-12
                );
            }
        }
    }
}

#[test]
fn test_ecal_junctions() {
    let clic = Variant::Cms2TEcal.config();
    assert_relative_eq!(
        clic.ecal.volume.inner_eta_junction().unwrap(),
        1.0219147427509454,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        clic.ecal.eta_boundary(),
        1.0219147427509454,
        epsilon = 1e-12
    );
    let cms = Variant::Cms2T.config();
    assert_relative_eq!(cms.ecal.eta_boundary(), 1.479);
}

#[test]
fn test_variant_specific_models() {
    let cms = Variant::Cms2T.detector().unwrap();
    let ecal_variant = Variant::Cms2TEcal.detector().unwrap();
    let hcal_variant = Variant::Cms2THcal.detector().unwrap();
    let tracker_variant = Variant::Cms2TTracker.detector().unwrap();

    assert_eq!(cms.jet_energy_correction(), Some(1.1));
    assert_eq!(ecal_variant.jet_energy_correction(), Some(1.1));
    assert_eq!(hcal_variant.jet_energy_correction(), None);
    assert_eq!(tracker_variant.jet_energy_correction(), None);

    let muon = Particle::new(13, 1, 40.0, 0.1, 0.0, 0.10566);
    assert_relative_eq!(ecal_variant.muon_resolution(&muon).unwrap(), 0.02);
    assert_relative_eq!(hcal_variant.muon_resolution(&muon).unwrap(), 0.02);
    assert_relative_eq!(
        tracker_variant.muon_resolution(&muon).unwrap(),
        tracker_variant.tracker().resolution(&muon).unwrap()
    );
}
