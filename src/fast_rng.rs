// Uniform random source for the samplers.
//
// FastRng is OpenMC's PCG-LCG generator. Its LCG core can be advanced by an
// arbitrary number of steps in O(log n), which gives every source particle
// its own disjoint stream when batches are filled in parallel.

use rand::{RngCore, SeedableRng};

/// LCG multiplier (same as OpenMC)
const PRN_MULT: u64 = 6364136223846793005;
/// LCG additive constant (same as OpenMC)
const PRN_ADD: u64 = 1442695040888963407;
/// Number of draws reserved for each particle history
pub const PRN_STRIDE: u64 = 152917;

/// Fast RNG using OpenMC's PCG-LCG algorithm.
///
/// Reference: Melissa E. O'Neill, "PCG: A Family of Simple Fast Space-Efficient
/// Statistically Good Algorithms for Random Number Generation"
#[derive(Clone, Copy, Debug)]
pub struct FastRng {
    seed: u64,
}

impl FastRng {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator for history `index` of a run started from `seed`.
    ///
    /// Histories are `PRN_STRIDE` draws apart on the same LCG sequence, so
    /// the result does not depend on which thread fills which state.
    pub fn for_history(seed: u64, index: u64) -> Self {
        Self::new(future_seed(index.wrapping_mul(PRN_STRIDE), seed))
    }

    /// Generate a random f64 in [0, 1)
    #[inline(always)]
    pub fn random(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Advance the stream by `n` draws without generating them.
    pub fn skip(&mut self, n: u64) {
        self.seed = future_seed(n, self.seed);
    }

    #[inline]
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }
}

/// LCG state reached after `n` steps from `seed`.
fn future_seed(mut n: u64, seed: u64) -> u64 {
    let mut g = PRN_MULT;
    let mut c = PRN_ADD;
    let mut g_new: u64 = 1;
    let mut c_new: u64 = 0;
    while n > 0 {
        if n & 1 == 1 {
            g_new = g_new.wrapping_mul(g);
            c_new = c_new.wrapping_mul(g).wrapping_add(c);
        }
        c = g.wrapping_add(1).wrapping_mul(c);
        g = g.wrapping_mul(g);
        n >>= 1;
    }
    g_new.wrapping_mul(seed).wrapping_add(c_new)
}

impl SeedableRng for FastRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            seed: u64::from_le_bytes(seed),
        }
    }
}

impl RngCore for FastRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        // Advance the LCG
        self.seed = PRN_MULT.wrapping_mul(self.seed).wrapping_add(PRN_ADD);

        // PCG output permutation (RXS-M-XS variant)
        let word = ((self.seed >> ((self.seed >> 59) + 5)) ^ self.seed)
            .wrapping_mul(12605985483714917081);
        (word >> 43) ^ word
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut left = dest;
        while left.len() >= 8 {
            let bytes = self.next_u64().to_le_bytes();
            left[..8].copy_from_slice(&bytes);
            left = &mut left[8..];
        }
        if !left.is_empty() {
            let bytes = self.next_u64().to_le_bytes();
            left.copy_from_slice(&bytes[..left.len()]);
        }
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Replays a fixed list of uniform variates, then repeats the last one.
///
/// Values are fed through `Rng::gen::<f64>()` unchanged as long as they
/// are multiples of 2^-53 (e.g. 0.25 or 0.5), which makes sampler branches
/// and weights exactly predictable in tests.
#[derive(Clone, Debug)]
pub struct ReplayRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplayRng {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "ReplayRng needs at least one value");
        assert!(
            values.iter().all(|&u| (0.0..1.0).contains(&u)),
            "ReplayRng values must lie in [0, 1)"
        );
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    /// Number of variates consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RngCore for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let index = self.cursor.min(self.values.len() - 1);
        self.cursor += 1;
        ((self.values[index] * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
