use rand::Rng;
use tracing::debug;

use crate::error::{Result, SourceError};

/// Gamma lines of the Rn-222 progeny Pb-214 and Bi-214, as
/// (energy in MeV, emission intensity in %).
pub const RADON_PROGENY_LINES: [(f64, f64); 11] = [
    (0.242, 7.27),
    (0.295, 18.42),
    (0.352, 35.60),
    (0.609, 45.49),
    (0.768, 4.894),
    (0.934, 3.10),
    (1.120, 14.91),
    (1.238, 5.831),
    (1.378, 3.968),
    (1.764, 15.31),
    (2.204, 4.913),
];

/// A discrete line spectrum prepared for inverse-transform sampling.
///
/// Lines keep the order in which they were given. The second member of
/// each pair holds the cumulative probability up to and including that
/// line, so the last entry is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTable {
    lines: Vec<(f64, f64)>,
}

impl SpectrumTable {
    /// Build the table from (energy, intensity) pairs.
    ///
    /// Intensities are replaced by their running sum divided by the total
    /// intensity. Fails if the table is empty, if an energy is not a
    /// positive number, if an intensity is negative, or if the total
    /// intensity is not positive.
    pub fn new(entries: &[(f64, f64)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(SourceError::InvalidSpectrum(
                "spectrum must contain at least one line".to_string(),
            ));
        }
        for &(energy, intensity) in entries {
            if !(energy.is_finite() && energy > 0.0) {
                return Err(SourceError::InvalidSpectrum(format!(
                    "line energy must be positive and finite, got {}",
                    energy
                )));
            }
            if !(intensity.is_finite() && intensity >= 0.0) {
                return Err(SourceError::InvalidSpectrum(format!(
                    "line intensity must be non-negative and finite, got {}",
                    intensity
                )));
            }
        }

        let total: f64 = entries.iter().map(|&(_, intensity)| intensity).sum();
        if !(total > 0.0) {
            return Err(SourceError::InvalidSpectrum(format!(
                "total intensity must be positive, got {}",
                total
            )));
        }

        debug!(lines = entries.len(), total_intensity = total, "built spectrum table");
        Ok(Self::cumulate(entries, total))
    }

    /// The Pb-214 / Bi-214 line spectrum.
    pub fn radon_progeny() -> Self {
        let total: f64 = RADON_PROGENY_LINES.iter().map(|&(_, i)| i).sum();
        Self::cumulate(&RADON_PROGENY_LINES, total)
    }

    fn cumulate(entries: &[(f64, f64)], total: f64) -> Self {
        let mut partial = 0.0;
        let lines = entries
            .iter()
            .map(|&(energy, intensity)| {
                partial += intensity;
                (energy, partial / total)
            })
            .collect();
        Self { lines }
    }

    /// (energy, cumulative probability) pairs in table order.
    pub fn lines(&self) -> &[(f64, f64)] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Energy of the first line whose cumulative probability reaches `u`.
    ///
    /// Falls back to the last line when rounding leaves the final
    /// cumulative value just below `u`.
    pub fn sample_energy(&self, u: f64) -> f64 {
        self.lines
            .iter()
            .find(|&&(_, cdf)| u <= cdf)
            .or_else(|| self.lines.last())
            .map(|&(energy, _)| energy)
            .unwrap_or(f64::NAN)
    }

    /// Draw one energy using a single uniform variate.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample_energy(rng.gen())
    }

    pub fn min_energy(&self) -> f64 {
        self.lines.iter().map(|&(e, _)| e).fold(f64::INFINITY, f64::min)
    }

    pub fn max_energy(&self) -> f64 {
        self.lines.iter().map(|&(e, _)| e).fold(0.0, f64::max)
    }

    /// Probability of the line at `index`, recovered from the CDF.
    pub fn probability(&self, index: usize) -> f64 {
        match index {
            0 => self.lines[0].1,
            i => self.lines[i].1 - self.lines[i - 1].1,
        }
    }
}

impl Default for SpectrumTable {
    fn default() -> Self {
        Self::radon_progeny()
    }
}
