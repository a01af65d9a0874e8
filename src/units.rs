// Length units used by the geometry.
//
// All internal geometry arithmetic is carried out in millimetres. Values
// only leave the crate in centimetres, through the helpers below.

pub const MM: f64 = 1.0;
pub const UM: f64 = 1e-3 * MM;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;
pub const KM: f64 = 1000.0 * M;

pub const CM2: f64 = CM * CM;
pub const CM3: f64 = CM * CM * CM;

/// Convert an internal length to centimetres.
#[inline]
pub fn to_cm(length: f64) -> f64 {
    length / CM
}

/// Convert an internal area to square centimetres.
#[inline]
pub fn to_cm2(area: f64) -> f64 {
    area / CM2
}

/// Convert an internal volume to cubic centimetres.
#[inline]
pub fn to_cm3(volume: f64) -> f64 {
    volume / CM3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_ratios() {
        assert_eq!(M / CM, 100.0);
        assert_eq!(KM / M, 1000.0);
        assert!((CM / UM - 1e4).abs() < 1e-9);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(to_cm(20.0 * M), 2000.0);
        assert_eq!(to_cm2(1.0 * M * M), 1e4);
        assert!((to_cm3(1.0 * M * M * M) - 1e6).abs() < 1e-6);
    }
}
