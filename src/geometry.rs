use tracing::debug;

use crate::bounding_box::BoundingBox;
use crate::error::{Result, SourceError};
use crate::units::{CM, KM, M};

/// Extents of the nested boxes making up the detector scene.
///
/// The world is the air box stacked on top of the ground slab, both sharing
/// the same horizontal size and centred on the vertical axis. The detector
/// sits inside the air, centred horizontally, `detector_offset` above the
/// world origin. All lengths are internal units (see [`crate::units`]).
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryExtents {
    world_size: [f64; 3],
    air_size: [f64; 3],
    ground_size: [f64; 3],
    detector_size: [f64; 3],
    detector_offset: f64,
}

impl GeometryExtents {
    /// Lay out the scene and check that the detector fits strictly inside the air.
    ///
    /// `clearance` is the gap between the ground surface and the bottom face
    /// of the detector.
    pub fn new(
        air_size: [f64; 3],
        ground_depth: f64,
        detector_size: [f64; 3],
        clearance: f64,
    ) -> Result<Self> {
        for (name, size) in [("air", &air_size), ("detector", &detector_size)] {
            if size.iter().any(|&x| !(x.is_finite() && x > 0.0)) {
                return Err(SourceError::InvalidGeometry(format!(
                    "{} size must be positive and finite, got {:?}",
                    name, size
                )));
            }
        }
        if !(ground_depth.is_finite() && ground_depth > 0.0) {
            return Err(SourceError::InvalidGeometry(format!(
                "ground depth must be positive and finite, got {}",
                ground_depth
            )));
        }
        if !(clearance.is_finite() && clearance >= 0.0) {
            return Err(SourceError::InvalidGeometry(format!(
                "detector clearance must be non-negative and finite, got {}",
                clearance
            )));
        }

        let extents = Self::layout(air_size, ground_depth, detector_size, clearance);
        if !extents.air_box().encloses(&extents.detector_box()) {
            return Err(SourceError::InvalidGeometry(format!(
                "detector {:?} at height {} does not fit strictly inside air {:?}",
                detector_size, extents.detector_offset, air_size
            )));
        }

        debug!(
            air_volume = extents.air_volume(),
            detector_volume = extents.detector_volume(),
            detector_offset = extents.detector_offset,
            "laid out detector geometry"
        );
        Ok(extents)
    }

    fn layout(
        air_size: [f64; 3],
        ground_depth: f64,
        detector_size: [f64; 3],
        clearance: f64,
    ) -> Self {
        let ground_size = [air_size[0], air_size[1], ground_depth];
        let world_size = [air_size[0], air_size[1], air_size[2] + ground_depth];
        let detector_offset =
            0.5 * (-air_size[2] + detector_size[2] + ground_size[2]) + clearance;
        Self {
            world_size,
            air_size,
            ground_size,
            detector_size,
            detector_offset,
        }
    }

    pub fn world_size(&self) -> [f64; 3] {
        self.world_size
    }

    pub fn air_size(&self) -> [f64; 3] {
        self.air_size
    }

    pub fn ground_size(&self) -> [f64; 3] {
        self.ground_size
    }

    pub fn detector_size(&self) -> [f64; 3] {
        self.detector_size
    }

    /// Height of the detector centre in the world frame.
    pub fn detector_offset(&self) -> f64 {
        self.detector_offset
    }

    /// Height of the air centre in the world frame.
    pub fn air_offset(&self) -> f64 {
        0.5 * self.ground_size[2]
    }

    pub fn detector_center(&self) -> [f64; 3] {
        [0.0, 0.0, self.detector_offset]
    }

    pub fn world_box(&self) -> BoundingBox {
        BoundingBox::from_center([0.0; 3], self.world_size)
    }

    pub fn air_box(&self) -> BoundingBox {
        BoundingBox::from_center([0.0, 0.0, self.air_offset()], self.air_size)
    }

    pub fn ground_box(&self) -> BoundingBox {
        BoundingBox::from_center([0.0, 0.0, -0.5 * self.air_size[2]], self.ground_size)
    }

    pub fn detector_box(&self) -> BoundingBox {
        BoundingBox::from_center(self.detector_center(), self.detector_size)
    }

    pub fn air_volume(&self) -> f64 {
        self.air_size.iter().product()
    }

    pub fn detector_volume(&self) -> f64 {
        self.detector_size.iter().product()
    }

    /// Volume of the air outside the detector.
    pub fn source_volume(&self) -> f64 {
        self.air_volume() - self.detector_volume()
    }

    /// Cumulative areas of the three face pairs, one slice per axis.
    ///
    /// Entry `a` adds the area of a single face perpendicular to axis `a`,
    /// so the last entry is half the detector surface.
    pub fn cumulative_face_areas(&self) -> [f64; 3] {
        let s = &self.detector_size;
        let mut c = [0.0; 3];
        let mut sum = 0.0;
        for (axis, slot) in c.iter_mut().enumerate() {
            sum += s[(axis + 1) % 3] * s[(axis + 2) % 3];
            *slot = sum;
        }
        c
    }

    pub fn detector_surface_area(&self) -> f64 {
        2.0 * self.cumulative_face_areas()[2]
    }
}

impl Default for GeometryExtents {
    /// A 20 x 20 x 10 m detector standing 5 cm above the ground, under
    /// 1 km of air spanning 2 x 2 km, over 1 m of ground.
    fn default() -> Self {
        Self::layout(
            [2.0 * KM, 2.0 * KM, 1.0 * KM],
            1.0 * M,
            [20.0 * M, 20.0 * M, 10.0 * M],
            5.0 * CM,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let g = GeometryExtents::default();
        assert_eq!(g.world_size(), [2.0 * KM, 2.0 * KM, 1.0 * KM + 1.0 * M]);
        assert_eq!(g.ground_size(), [2.0 * KM, 2.0 * KM, 1.0 * M]);
        assert_eq!(g.air_offset(), 0.5 * M);

        // Detector bottom rests 5 cm above the ground surface
        let ground_top = g.ground_box().upper_right[2];
        let detector_bottom = g.detector_box().lower_left[2];
        assert!((detector_bottom - ground_top - 5.0 * CM).abs() < 1e-6);
        assert!((ground_top - g.air_box().lower_left[2]).abs() < 1e-6);
    }

    #[test]
    fn test_default_is_valid() {
        let g = GeometryExtents::default();
        let checked = GeometryExtents::new(
            g.air_size(),
            g.ground_size()[2],
            g.detector_size(),
            5.0 * CM,
        )
        .unwrap();
        assert_eq!(g, checked);
    }

    #[test]
    fn test_boxes_stack_into_world() {
        let g = GeometryExtents::default();
        let world = g.world_box();
        assert!((g.ground_box().lower_left[2] - world.lower_left[2]).abs() < 1e-6);
        assert!((g.air_box().upper_right[2] - world.upper_right[2]).abs() < 1e-6);
    }

    #[test]
    fn test_face_areas() {
        let g = GeometryExtents::default();
        let c = g.cumulative_face_areas();
        let m2 = M * M;
        assert_eq!(c, [200.0 * m2, 400.0 * m2, 800.0 * m2]);
        assert_eq!(g.detector_surface_area(), g.detector_box().surface_area());
    }

    #[test]
    fn test_source_volume() {
        let g = GeometryExtents::default();
        let expected = 4.0 * KM * KM * KM - 4000.0 * M * M * M;
        assert!((g.source_volume() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_detector_too_wide() {
        let err = GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [10.0, 5.0, 5.0], 0.0);
        assert!(matches!(err, Err(SourceError::InvalidGeometry(_))));
    }

    #[test]
    fn test_detector_too_tall() {
        // Clearance pushes the detector through the top of the air
        let err = GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [5.0, 5.0, 5.0], 6.0);
        assert!(matches!(err, Err(SourceError::InvalidGeometry(_))));
        // Without clearance the detector touches the ground surface
        let err = GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [5.0, 5.0, 5.0], 0.0);
        assert!(matches!(err, Err(SourceError::InvalidGeometry(_))));
        assert!(GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [5.0, 5.0, 5.0], 1.0).is_ok());
    }

    #[test]
    fn test_non_positive_sizes() {
        assert!(GeometryExtents::new([0.0, 10.0, 10.0], 1.0, [1.0, 1.0, 1.0], 0.5).is_err());
        assert!(GeometryExtents::new([10.0, 10.0, 10.0], -1.0, [1.0, 1.0, 1.0], 0.5).is_err());
        assert!(GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [1.0, f64::NAN, 1.0], 0.5).is_err());
        assert!(GeometryExtents::new([10.0, 10.0, 10.0], 1.0, [1.0, 1.0, 1.0], -0.5).is_err());
    }
}
