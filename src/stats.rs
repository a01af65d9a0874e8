use rand::Rng;
use std::f64::consts::PI;

/// Angular distributions used to emit source particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngularDistribution {
    /// Uniform over the unit sphere.
    Isotropic,
    /// Cosine law over the hemisphere around `sign * e_axis`.
    Lambertian { axis: usize, sign: f64 },
}

impl AngularDistribution {
    pub fn new_isotropic() -> Self {
        Self::Isotropic
    }

    /// Cosine-law hemisphere about the positive (`sign > 0`) or negative
    /// (`sign < 0`) direction of `axis`.
    pub fn new_lambertian(axis: usize, sign: f64) -> Self {
        assert!(axis < 3, "axis index must be 0, 1 or 2, got {}", axis);
        Self::Lambertian {
            axis,
            sign: if sign < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// Sample a direction, consuming exactly two uniform variates.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        match *self {
            AngularDistribution::Isotropic => {
                let mu = 2.0 * rng.gen::<f64>() - 1.0;
                let phi = 2.0 * PI * rng.gen::<f64>();
                let sin_theta = (1.0 - mu * mu).sqrt();
                [sin_theta * phi.cos(), sin_theta * phi.sin(), mu]
            }
            AngularDistribution::Lambertian { axis, sign } => {
                let u: f64 = rng.gen();
                let cos_theta = u.sqrt();
                let sin_theta = (1.0 - u).sqrt();
                let phi = 2.0 * PI * rng.gen::<f64>();
                let mut direction = [0.0; 3];
                direction[(axis + 1) % 3] = sign * sin_theta * phi.cos();
                direction[(axis + 2) % 3] = sign * sin_theta * phi.sin();
                direction[axis] = sign * cos_theta;
                direction
            }
        }
    }
}
