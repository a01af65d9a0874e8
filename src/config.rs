// Configuration of the detector scene and of the samplers.
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{check_alpha, Result};
use crate::fast_rng::FastRng;
use crate::geometry::GeometryExtents;
use crate::source::DetectorSource;
use crate::spectrum::{SpectrumTable, RADON_PROGENY_LINES};
use crate::units::M;

/// User-facing description of a [`DetectorSource`].
///
/// Lengths are given in metres and energies in MeV. Every field has a
/// default, so a JSON document only needs the values it changes:
///
/// ```json
/// { "detector_size": [10.0, 10.0, 5.0], "alpha": 0.25, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Horizontal and vertical extent of the air volume.
    pub air_size: [f64; 3],
    /// Thickness of the ground slab under the air.
    pub ground_depth: f64,
    pub detector_size: [f64; 3],
    /// Gap between the ground surface and the bottom of the detector.
    pub detector_clearance: f64,
    /// (energy, intensity) lines in sampling order.
    pub spectrum: Vec<(f64, f64)>,
    /// Probability of keeping the source energy in backward sampling.
    pub alpha: f64,
    /// Random seed, or `None` to seed from the operating system.
    pub seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            air_size: [2000.0, 2000.0, 1000.0],
            ground_depth: 1.0,
            detector_size: [20.0, 20.0, 10.0],
            detector_clearance: 0.05,
            spectrum: RADON_PROGENY_LINES.to_vec(),
            alpha: 0.5,
            seed: None,
        }
    }
}

impl SourceConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), "loaded source configuration");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration and build the source in internal units.
    pub fn build(&self) -> Result<DetectorSource> {
        check_alpha(self.alpha)?;
        let extents = GeometryExtents::new(
            self.air_size.map(|x| x * M),
            self.ground_depth * M,
            self.detector_size.map(|x| x * M),
            self.detector_clearance * M,
        )?;
        let spectrum = SpectrumTable::new(&self.spectrum)?;
        Ok(DetectorSource::new(extents, spectrum))
    }

    /// Random source for a sequential run.
    pub fn rng(&self) -> FastRng {
        match self.seed {
            Some(seed) => FastRng::new(seed),
            None => FastRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;

    #[test]
    fn test_default_config_builds_default_source() {
        let source = SourceConfig::default().build().unwrap();
        assert_eq!(source.spectrum, SpectrumTable::radon_progeny());
        let default = GeometryExtents::default();
        for i in 0..3 {
            assert!((source.extents.air_size()[i] - default.air_size()[i]).abs() < 1e-6);
            assert!((source.extents.detector_size()[i] - default.detector_size()[i]).abs() < 1e-6);
        }
        assert!((source.extents.detector_offset() - default.detector_offset()).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json() {
        let config =
            SourceConfig::from_json_str(r#"{ "alpha": 0.25, "seed": 42, "spectrum": [[1.0, 1.0]] }"#)
                .unwrap();
        assert_eq!(config.alpha, 0.25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.spectrum, vec![(1.0, 1.0)]);
        assert_eq!(config.detector_size, [20.0, 20.0, 10.0]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SourceConfig::from_json_str(r#"{ "detector": [1.0, 1.0, 1.0] }"#);
        assert!(matches!(err, Err(SourceError::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SourceConfig {
            seed: Some(3),
            ..SourceConfig::default()
        };
        let text = config.to_json_string().unwrap();
        assert_eq!(SourceConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_build_errors() {
        let config = SourceConfig {
            alpha: 1.0,
            ..SourceConfig::default()
        };
        assert!(matches!(config.build(), Err(SourceError::InvalidParameter(_))));

        let config = SourceConfig {
            detector_size: [3000.0, 20.0, 10.0],
            ..SourceConfig::default()
        };
        assert!(matches!(config.build(), Err(SourceError::InvalidGeometry(_))));

        let config = SourceConfig {
            spectrum: vec![],
            ..SourceConfig::default()
        };
        assert!(matches!(config.build(), Err(SourceError::InvalidSpectrum(_))));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let config = SourceConfig {
            seed: Some(9),
            ..SourceConfig::default()
        };
        let a: f64 = config.rng().gen();
        let b: f64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_file() {
        let err = SourceConfig::from_file("does/not/exist.json");
        assert!(matches!(err, Err(SourceError::Io(_))));
    }
}
