use serde::{Deserialize, Serialize};

/// Initial state of a Monte Carlo particle.
///
/// Positions are in centimetres, the direction is a unit vector and the
/// energy is in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub energy: f64,
    pub weight: f64,
}

impl ParticleState {
    pub fn new(position: [f64; 3], direction: [f64; 3], energy: f64) -> Self {
        Self {
            position,
            direction,
            energy,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for ParticleState {
    fn default() -> Self {
        Self::new([0.0; 3], [0.0, 0.0, 1.0], 0.0)
    }
}
