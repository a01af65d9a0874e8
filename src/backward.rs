use rand::Rng;
use std::f64::consts::PI;

use crate::error::{check_alpha, Result};
use crate::geometry::GeometryExtents;
use crate::particle::ParticleState;
use crate::spectrum::SpectrumTable;
use crate::stats::AngularDistribution;
use crate::units::{to_cm, to_cm2, UM};

/// Lower bound of the log-uniform energy proposal, in MeV.
pub const ENERGY_MIN: f64 = 1e-2;

/// Gap between the detector surface and the sampled points.
pub const SURFACE_CLEARANCE: f64 = 1.0 * UM;

/// One face of the detector box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// Axis the face is perpendicular to.
    pub axis: usize,
    /// Side of the box, -1 or +1 along `axis`.
    pub side: i32,
}

impl Face {
    /// Index in 0..6, ordered (-x, +x, -y, +y, -z, +z).
    pub fn index(&self) -> usize {
        2 * self.axis + usize::from(self.side > 0)
    }
}

/// Result of a backward draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackwardSample {
    pub state: ParticleState,
    /// Energy drawn from the source spectrum, independent of `state.energy`.
    pub source_energy: f64,
    pub face: Face,
}

/// Importance sampling of states entering the detector.
///
/// Points are drawn uniformly on the detector surface with a cosine-law
/// direction pointing into the detector. The emitted energy is either the
/// source energy (probability `alpha`) or a log-uniform value between
/// [`ENERGY_MIN`] and the source energy. The state weight undoes both
/// biases.
#[derive(Debug, Clone, Copy)]
pub struct BackwardSampler<'a> {
    extents: &'a GeometryExtents,
    spectrum: &'a SpectrumTable,
    alpha: f64,
}

impl<'a> BackwardSampler<'a> {
    /// Fails with `InvalidParameter` unless `0 < alpha < 1`.
    pub fn new(
        extents: &'a GeometryExtents,
        spectrum: &'a SpectrumTable,
        alpha: f64,
    ) -> Result<Self> {
        check_alpha(alpha)?;
        Ok(Self {
            extents,
            spectrum,
            alpha,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Draw one state and its companion source energy.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (ParticleState, f64) {
        let sample = self.sample_detailed(rng);
        (sample.state, sample.source_energy)
    }

    pub fn sample_detailed<R: Rng + ?Sized>(&self, rng: &mut R) -> BackwardSample {
        let c = self.extents.cumulative_face_areas();
        let face = select_face(&c, rng.gen::<f64>() * c[2]);

        let size = self.extents.detector_size();
        let center = self.extents.detector_center();
        let sign = f64::from(face.side);
        let mut position = [0.0; 3];
        position[face.axis] =
            sign * (0.5 * size[face.axis] + SURFACE_CLEARANCE) + center[face.axis];
        for i in 1..3 {
            let j = (face.axis + i) % 3;
            position[j] = size[j] * (0.5 - rng.gen::<f64>()) + center[j];
        }

        let direction = AngularDistribution::new_lambertian(face.axis, -sign).sample(rng);
        // Surface times the cosine-law solid angle normalisation
        let mut weight = 2.0 * to_cm2(c[2]) * PI;

        let source_energy = self.spectrum.sample(rng);
        let energy = if rng.gen::<f64>() < self.alpha {
            weight /= self.alpha;
            source_energy
        } else {
            let log_ratio = (source_energy / ENERGY_MIN).ln();
            let energy = ENERGY_MIN * (log_ratio * rng.gen::<f64>()).exp();
            weight *= energy * log_ratio / (1.0 - self.alpha);
            energy
        };

        BackwardSample {
            state: ParticleState::new(position.map(to_cm), direction, energy).with_weight(weight),
            source_energy,
            face,
        }
    }
}

/// Pick a face given `r` uniform in [0, c[2]).
///
/// Face pairs are chosen in proportion to their area, then the side by
/// which half of the pair's slice `r` falls in.
fn select_face(c: &[f64; 3], r: f64) -> Face {
    let axis = c.iter().position(|&ci| r <= ci).unwrap_or(2);
    let delta = if axis > 0 { c[axis] - c[axis - 1] } else { c[0] };
    let side = if c[axis] - r > 0.5 * delta { -1 } else { 1 };
    Face { axis, side }
}
