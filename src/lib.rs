//! Initial particle states for a gamma-ray detector Monte Carlo.
//!
//! Two source models share one geometry and one line spectrum:
//!
//! - forward: states spread uniformly through the air outside the
//!   detector, isotropic, with energies from the spectrum and unit weight;
//! - backward: states entering the detector through its surface with a
//!   cosine law, an energy biased towards low values, and a weight that
//!   corrects both biases.
//!
//! ```
//! use mcsource::{DetectorSource, FastRng};
//!
//! let source = DetectorSource::default();
//! let mut rng = FastRng::new(1);
//! let states = source.forward_batch(10, &mut rng);
//! let (biased, source_energies) = source.backward_batch(0.5, 10, &mut rng).unwrap();
//! assert_eq!(states.len(), biased.len());
//! assert_eq!(source_energies.len(), 10);
//! ```

pub mod backward;
pub mod bounding_box;
pub mod config;
pub mod error;
pub mod fast_rng;
pub mod forward;
pub mod geometry;
pub mod particle;
pub mod source;
pub mod spectrum;
pub mod stats;
pub mod units;

pub use backward::{BackwardSample, BackwardSampler, Face, ENERGY_MIN};
pub use bounding_box::BoundingBox;
pub use config::SourceConfig;
pub use error::{Result, SourceError};
pub use fast_rng::{FastRng, ReplayRng};
pub use forward::ForwardSampler;
pub use geometry::GeometryExtents;
pub use particle::ParticleState;
pub use source::DetectorSource;
pub use spectrum::SpectrumTable;
pub use stats::AngularDistribution;
