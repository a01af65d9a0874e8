use rand::Rng;
use rayon::prelude::*;
use tracing::instrument;

use crate::backward::BackwardSampler;
use crate::error::{Result, SourceError};
use crate::fast_rng::FastRng;
use crate::forward::ForwardSampler;
use crate::geometry::GeometryExtents;
use crate::particle::ParticleState;
use crate::spectrum::SpectrumTable;
use crate::units::to_cm3;

/// Gamma source spread through the air around a box detector.
///
/// Holds the read-only geometry and spectrum shared by the forward and
/// backward samplers, and fills batches of initial states. The random
/// source is always passed in by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectorSource {
    pub extents: GeometryExtents,
    pub spectrum: SpectrumTable,
}

impl DetectorSource {
    pub fn new(extents: GeometryExtents, spectrum: SpectrumTable) -> Self {
        Self { extents, spectrum }
    }

    pub fn forward(&self) -> ForwardSampler<'_> {
        ForwardSampler::new(&self.extents, &self.spectrum)
    }

    pub fn backward(&self, alpha: f64) -> Result<BackwardSampler<'_>> {
        BackwardSampler::new(&self.extents, &self.spectrum, alpha)
    }

    /// Draw a single forward state.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleState {
        self.forward().sample(rng)
    }

    /// Fill `states` in order with forward samples.
    #[instrument(level = "debug", skip_all, fields(count = states.len()))]
    pub fn sample_forward<R: Rng + ?Sized>(&self, states: &mut [ParticleState], rng: &mut R) {
        let sampler = self.forward();
        for state in states.iter_mut() {
            *state = sampler.sample(rng);
        }
    }

    /// Fill `states` and the matching source energies with backward samples.
    ///
    /// Both slices must have the same length and `alpha` must lie strictly
    /// between 0 and 1. Nothing is written when either check fails.
    #[instrument(level = "debug", skip(self, states, source_energies, rng), fields(count = states.len()))]
    pub fn sample_backward<R: Rng + ?Sized>(
        &self,
        alpha: f64,
        states: &mut [ParticleState],
        source_energies: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        check_lengths(states.len(), source_energies.len())?;
        let sampler = self.backward(alpha)?;
        for (state, source_energy) in states.iter_mut().zip(source_energies.iter_mut()) {
            (*state, *source_energy) = sampler.sample(rng);
        }
        Ok(())
    }

    /// Allocate and fill `count` forward states.
    pub fn forward_batch<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<ParticleState> {
        let mut states = vec![ParticleState::default(); count];
        self.sample_forward(&mut states, rng);
        states
    }

    /// Allocate and fill `count` backward states with their source energies.
    pub fn backward_batch<R: Rng + ?Sized>(
        &self,
        alpha: f64,
        count: usize,
        rng: &mut R,
    ) -> Result<(Vec<ParticleState>, Vec<f64>)> {
        let mut states = vec![ParticleState::default(); count];
        let mut source_energies = vec![0.0; count];
        self.sample_backward(alpha, &mut states, &mut source_energies, rng)?;
        Ok((states, source_energies))
    }

    /// Parallel version of [`Self::sample_forward`].
    ///
    /// State `i` draws from `FastRng::for_history(seed, i)`, so the output
    /// only depends on `seed`, not on the number of threads.
    #[instrument(level = "debug", skip(self, states), fields(count = states.len()))]
    pub fn par_sample_forward(&self, seed: u64, states: &mut [ParticleState]) {
        let sampler = self.forward();
        states.par_iter_mut().enumerate().for_each(|(i, state)| {
            let mut rng = FastRng::for_history(seed, i as u64);
            *state = sampler.sample(&mut rng);
        });
    }

    /// Parallel version of [`Self::sample_backward`], with per-state
    /// streams as in [`Self::par_sample_forward`].
    #[instrument(level = "debug", skip(self, states, source_energies), fields(count = states.len()))]
    pub fn par_sample_backward(
        &self,
        alpha: f64,
        seed: u64,
        states: &mut [ParticleState],
        source_energies: &mut [f64],
    ) -> Result<()> {
        check_lengths(states.len(), source_energies.len())?;
        let sampler = self.backward(alpha)?;
        states
            .par_iter_mut()
            .zip(source_energies.par_iter_mut())
            .enumerate()
            .for_each(|(i, (state, source_energy))| {
                let mut rng = FastRng::for_history(seed, i as u64);
                (*state, *source_energy) = sampler.sample(&mut rng);
            });
        Ok(())
    }

    /// Volume of air outside the detector, in cm3.
    pub fn source_volume(&self) -> f64 {
        to_cm3(self.extents.source_volume())
    }
}

fn check_lengths(states: usize, source_energies: usize) -> Result<()> {
    if states != source_energies {
        return Err(SourceError::InvalidParameter(format!(
            "got {} states but {} source energy slots",
            states, source_energies
        )));
    }
    Ok(())
}
