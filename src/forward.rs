use rand::Rng;
use tracing::trace;

use crate::geometry::GeometryExtents;
use crate::particle::ParticleState;
use crate::spectrum::SpectrumTable;
use crate::stats::AngularDistribution;
use crate::units::to_cm;

/// Unbiased sampling of the physical source: uniform in the air outside
/// the detector, isotropic, with energies drawn from the line spectrum.
#[derive(Debug, Clone, Copy)]
pub struct ForwardSampler<'a> {
    extents: &'a GeometryExtents,
    spectrum: &'a SpectrumTable,
}

impl<'a> ForwardSampler<'a> {
    pub fn new(extents: &'a GeometryExtents, spectrum: &'a SpectrumTable) -> Self {
        Self { extents, spectrum }
    }

    /// Draw one state with unit weight.
    ///
    /// Draws are consumed in a fixed order: two for the direction, three
    /// per position trial, one for the energy.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleState {
        let direction = AngularDistribution::Isotropic.sample(rng);
        let position = self.sample_position(rng);
        let energy = self.spectrum.sample(rng);
        ParticleState::new(position.map(to_cm), direction, energy)
    }

    /// Uniform point in the air box, rejected while it falls inside the
    /// detector or on its boundary. Internal units, world frame.
    ///
    /// The loop ends almost surely because [`GeometryExtents::new`] only
    /// accepts detectors strictly smaller than the air.
    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        let air = self.extents.air_size();
        let detector = self.extents.detector_box();
        let air_offset = self.extents.air_offset();
        let mut rejected = 0usize;
        loop {
            let position = [
                air[0] * (0.5 - rng.gen::<f64>()),
                air[1] * (0.5 - rng.gen::<f64>()),
                air[2] * (0.5 - rng.gen::<f64>()) + air_offset,
            ];
            if !detector.contains(position) {
                if rejected > 0 {
                    trace!(rejected, "forward position accepted after rejections");
                }
                return position;
            }
            rejected += 1;
        }
    }

    /// Fraction of the air volume from which states are drawn.
    pub fn acceptance(&self) -> f64 {
        self.extents.source_volume() / self.extents.air_volume()
    }
}
