//! A complete detector: the five elements and the detector-level models.

use fastsim_core::{Element, ElementKind, Kinematics, SurfaceCylinder, UniformSource};

use crate::config::DetectorConfig;
use crate::ecal::Ecal;
use crate::error::Result;
use crate::hcal::Hcal;
use crate::particles::{ElectronModel, MuonModel};
use crate::passive::{BeamPipe, Field};
use crate::tracker::Tracker;

/// A validated detector.
///
/// Built once from a [`DetectorConfig`] and read-only afterwards, so it can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Build a detector from a configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "built detector {} (ecal boundary |eta| = {:.4})",
            config.name,
            config.ecal.eta_boundary()
        );
        Ok(Self { config })
    }

    /// Configuration name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Underlying configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn tracker(&self) -> &Tracker {
        &self.config.tracker
    }

    pub fn ecal(&self) -> &Ecal {
        &self.config.ecal
    }

    pub fn hcal(&self) -> &Hcal {
        &self.config.hcal
    }

    pub fn field(&self) -> &Field {
        &self.config.field
    }

    pub fn beampipe(&self) -> &BeamPipe {
        &self.config.beampipe
    }

    /// Element of the given kind.
    pub fn element_of(&self, kind: ElementKind) -> &dyn Element {
        match kind {
            ElementKind::Tracker => &self.config.tracker,
            ElementKind::Ecal => &self.config.ecal,
            ElementKind::Hcal => &self.config.hcal,
            ElementKind::Field => &self.config.field,
            ElementKind::BeamPipe => &self.config.beampipe,
        }
    }

    /// Element looked up by name.
    ///
    /// # Errors
    /// Returns an error for a name outside [`Self::element_names`].
    pub fn element(&self, name: &str) -> Result<&dyn Element> {
        let kind: ElementKind = name.parse()?;
        Ok(self.element_of(kind))
    }

    /// Names of the elements, in registration order.
    pub fn element_names(&self) -> [&'static str; 5] {
        ElementKind::ALL.map(|kind| kind.as_str())
    }

    /// All elements, in registration order.
    pub fn elements(&self) -> impl Iterator<Item = &dyn Element> {
        ElementKind::ALL.into_iter().map(|kind| self.element_of(kind))
    }

    /// Every surface of every element, sorted by increasing radius.
    pub fn cylinders(&self) -> Vec<&SurfaceCylinder> {
        let mut surfaces: Vec<_> = self
            .elements()
            .flat_map(|element| element.volume().surfaces())
            .collect();
        surfaces.sort_by(|a, b| a.radius.total_cmp(&b.radius));
        surfaces
    }

    /// Detector-level electron acceptance.
    pub fn electron_acceptance<K, U>(&self, electron: &K, rng: &mut U) -> bool
    where
        K: Kinematics + ?Sized,
        U: UniformSource + ?Sized,
    {
        self.config.electron.acceptance(electron, rng)
    }

    /// Detector-level relative electron momentum resolution.
    pub fn electron_resolution<K: Kinematics + ?Sized>(&self, electron: &K) -> f64 {
        self.config.electron.resolution(electron)
    }

    /// Detector-level muon acceptance.
    pub fn muon_acceptance<K, U>(&self, muon: &K, rng: &mut U) -> bool
    where
        K: Kinematics + ?Sized,
        U: UniformSource + ?Sized,
    {
        self.config.muon.acceptance(muon, rng)
    }

    /// Detector-level relative muon momentum resolution.
    ///
    /// # Errors
    /// Returns an error when the resolution table does not cover the muon.
    pub fn muon_resolution<K: Kinematics + ?Sized>(&self, muon: &K) -> Result<f64> {
        self.config.muon.resolution(muon, &self.config.tracker)
    }

    /// Jet energy correction factor, if this detector defines one.
    pub fn jet_energy_correction(&self) -> Option<f64> {
        self.config.jet_energy_correction
    }

    pub fn electron_model(&self) -> &ElectronModel {
        &self.config.electron
    }

    pub fn muon_model(&self) -> &MuonModel {
        &self.config.muon
    }
}

impl TryFrom<DetectorConfig> for Detector {
    type Error = crate::error::Error;

    fn try_from(config: DetectorConfig) -> Result<Self> {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::variants::Variant;
    use approx::assert_relative_eq;
    use fastsim_core::{FixedDraw, Particle};

    #[test]
    fn test_element_lookup() {
        let detector = Variant::Cms2T.detector().unwrap();
        for name in detector.element_names() {
            assert_eq!(detector.element(name).unwrap().name(), name);
        }
        let err = detector.element("muon_chambers").err().unwrap();
        assert!(
            matches!(
                err,
                Error::CoreError(fastsim_core::Error::UnknownElement(_))
            ),
            "{err}"
        );
    }

    #[test]
    fn test_cylinders_sorted_by_radius() {
        let detector = Variant::Cms2THcal.detector().unwrap();
        let cylinders = detector.cylinders();
        assert!(cylinders.windows(2).all(|w| w[0].radius <= w[1].radius));
        assert_eq!(cylinders.first().unwrap().name, "beampipe_in");
        assert_eq!(cylinders.last().unwrap().name, "hcal_out");
        // tracker and field are solid; the other three have two surfaces
        assert_eq!(cylinders.len(), 8);
    }

    #[test]
    fn test_detector_level_dispatch() {
        let detector = Variant::Cms2T.detector().unwrap();
        let electron = Particle::new(11, -1, 20.0, 0.5, 0.0, 0.0);
        assert!(detector.electron_acceptance(&electron, &mut FixedDraw(0.5)));
        assert_relative_eq!(detector.electron_resolution(&electron), 0.03);

        let muon = Particle::new(13, 1, 20.0, 0.2, 0.0, 0.0);
        assert!(detector.muon_acceptance(&muon, &mut FixedDraw(0.5)));
        assert_relative_eq!(
            detector.muon_resolution(&muon).unwrap(),
            0.01_f64.hypot(1e-4)
        );
        assert_eq!(detector.jet_energy_correction(), Some(1.1));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Variant::Cms2T.config();
        config.tracker.volume.outer.radius = -1.0;
        assert!(Detector::new(config.clone()).is_err());
        assert!(Detector::try_from(config).is_err());
    }
}
