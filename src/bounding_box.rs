/// Axis-aligned box in the world frame, internal length units.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
    pub center: [f64; 3],
    pub width: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower_left: [f64; 3], upper_right: [f64; 3]) -> Self {
        let center = [
            0.5 * (lower_left[0] + upper_right[0]),
            0.5 * (lower_left[1] + upper_right[1]),
            0.5 * (lower_left[2] + upper_right[2]),
        ];
        let width = [
            upper_right[0] - lower_left[0],
            upper_right[1] - lower_left[1],
            upper_right[2] - lower_left[2],
        ];
        BoundingBox {
            lower_left,
            upper_right,
            center,
            width,
        }
    }

    pub fn from_center(center: [f64; 3], width: [f64; 3]) -> Self {
        let lower_left = [
            center[0] - 0.5 * width[0],
            center[1] - 0.5 * width[1],
            center[2] - 0.5 * width[2],
        ];
        let upper_right = [
            center[0] + 0.5 * width[0],
            center[1] + 0.5 * width[1],
            center[2] + 0.5 * width[2],
        ];
        BoundingBox {
            lower_left,
            upper_right,
            center,
            width,
        }
    }

    /// True if the point is inside the box or on its boundary.
    ///
    /// Points on the boundary count as inside, matching the rejection test
    /// of the forward sampler which only accepts points strictly outside.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| (point[i] - self.center[i]).abs() <= 0.5 * self.width[i])
    }

    /// True if the point lies strictly inside the box.
    pub fn contains_strictly(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| (point[i] - self.center[i]).abs() < 0.5 * self.width[i])
    }

    /// True if `other` fits strictly inside this box along every axis.
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        (0..3).all(|i| {
            other.lower_left[i] > self.lower_left[i] && other.upper_right[i] < self.upper_right[i]
        })
    }

    pub fn volume(&self) -> f64 {
        self.width[0] * self.width[1] * self.width[2]
    }

    /// Total area of the six faces.
    pub fn surface_area(&self) -> f64 {
        let [a, b, c] = self.width;
        2.0 * (a * b + b * c + c * a)
    }
}
