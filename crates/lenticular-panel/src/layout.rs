//! # Facet Layout
//!
//! Places the two facet families of a panel as a zig-zag ridge along +X.
//!
//! Facet 1 of every pair is rotated by `+half_angle` about the vertical axis
//! and spans direction `V1 = (cos, 0, -sin)`; facet 2 is rotated by
//! `-half_angle` and spans `V2 = (cos, 0, sin)`. Facet 2 is offset by half of
//! each facet along its own direction so the two meet at the ridge, and each
//! slice is offset from the previous one by the pitch `length1·V1 +
//! length2·V2`, whose X component is exactly `width / slice_count`.
//! With unequal side lengths the pitch tilts out of the X axis and is longer
//! than `scaled_step`, so slice `i` does not sit at `i·scaled_step` along `T`.

use glam::{DAffine3, DQuat, DVec3};
use lenticular_core::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Triangle indices of a facet quad, counter-clockwise when seen from +Z
/// before rotation
pub const FACET_INDICES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Half of the supplement of the interlace angle
pub fn half_angle(interlace_angle: f64) -> f64 {
    0.5 * (PI - interlace_angle)
}

/// Longitudinal footprint of one unscaled facet pair
pub fn developed_width(side_lengths: [f64; 2], interlace_angle: f64) -> f64 {
    (side_lengths[0] + side_lengths[1]) * half_angle(interlace_angle).cos()
}

/// One vertex of a facet quad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetVertex {
    pub position: DVec3,
    pub uv: [f64; 2],
}

/// Size and placement of a single planar facet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetGeometry {
    pub width: f64,
    pub height: f64,
    /// Rotation about +Y in radians
    pub rotation_y: f64,
    pub translation: DVec3,
}

impl FacetGeometry {
    /// Rotation about the facet centre followed by the translation
    pub fn transform(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(DQuat::from_rotation_y(self.rotation_y), self.translation)
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order
    pub fn vertices(&self) -> [FacetVertex; 4] {
        let transform = self.transform();
        let (hw, hh) = (0.5 * self.width, 0.5 * self.height);
        let corner = |x: f64, y: f64, uv: [f64; 2]| FacetVertex {
            position: transform.transform_point3(DVec3::new(x, y, 0.0)),
            uv,
        };
        [
            corner(-hw, hh, [0.0, 1.0]),
            corner(hw, hh, [1.0, 1.0]),
            corner(-hw, -hh, [0.0, 0.0]),
            corner(hw, -hh, [1.0, 0.0]),
        ]
    }

    pub fn indices(&self) -> [u32; 6] {
        FACET_INDICES
    }

    /// Centres of the facet's left and right vertical edges
    pub fn edges(&self) -> (DVec3, DVec3) {
        let transform = self.transform();
        let hw = 0.5 * self.width;
        (
            transform.transform_point3(DVec3::new(-hw, 0.0, 0.0)),
            transform.transform_point3(DVec3::new(hw, 0.0, 0.0)),
        )
    }
}

/// Placement of the two facets at one slice index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetPair {
    pub slice: usize,
    pub width1: f64,
    pub width2: f64,
    pub height: f64,
    pub rotation1: f64,
    pub rotation2: f64,
    pub translation1: DVec3,
    pub translation2: DVec3,
}

impl FacetPair {
    /// Geometry of both facets, indexed by face
    pub fn facets(&self) -> [FacetGeometry; 2] {
        [
            FacetGeometry {
                width: self.width1,
                height: self.height,
                rotation_y: self.rotation1,
                translation: self.translation1,
            },
            FacetGeometry {
                width: self.width2,
                height: self.height,
                rotation_y: self.rotation2,
                translation: self.translation2,
            },
        ]
    }
}

/// Complete facet layout of a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LentilLayout {
    pub half_angle: f64,
    pub developed_width: f64,
    /// Longitudinal advance per slice
    pub scaled_step: f64,
    pub scale: f64,
    pub length1: f64,
    pub length2: f64,
    pub height: f64,
    /// Unit longitudinal axis `T`
    pub axis: DVec3,
    /// Offset between consecutive slices
    pub pitch: DVec3,
    pub pairs: Vec<FacetPair>,
}

impl LentilLayout {
    pub fn slice_count(&self) -> usize {
        self.pairs.len()
    }

    /// Total longitudinal extent of the ridge
    pub fn span(&self) -> f64 {
        self.pitch.x * self.pairs.len() as f64
    }
}

/// Computes a [`LentilLayout`] from panel-level ratios
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetLayoutBuilder {
    width: f64,
    slice_count: usize,
    side_lengths: [f64; 2],
    interlace_angle: f64,
    aspect_ratio: f64,
}

impl FacetLayoutBuilder {
    /// Square facets meeting at a right angle, unit aspect ratio
    pub fn new(width: f64, slice_count: usize) -> Self {
        Self {
            width,
            slice_count,
            side_lengths: [1.0, 1.0],
            interlace_angle: PI / 2.0,
            aspect_ratio: 1.0,
        }
    }

    /// Builder method to set the relative facet lengths
    pub fn with_side_lengths(mut self, first: f64, second: f64) -> Self {
        self.side_lengths = [first, second];
        self
    }

    /// Builder method to set the interlace angle in radians
    pub fn with_interlace_angle(mut self, angle: f64) -> Self {
        self.interlace_angle = angle;
        self
    }

    /// Builder method to set the panel aspect ratio (width over height)
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.slice_count == 0 {
            return Err(ConfigError::InvalidSliceCount(self.slice_count));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::NonPositiveWidth(self.width));
        }
        if !(self.interlace_angle > 0.0 && self.interlace_angle < PI) {
            return Err(ConfigError::InterlaceAngleOutOfRange(self.interlace_angle));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::NonPositiveAspectRatio(self.aspect_ratio));
        }
        for (face, &value) in self.side_lengths.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSideLength { face, value });
            }
        }
        Ok(())
    }

    pub fn build(&self) -> ConfigResult<LentilLayout> {
        self.validate()?;

        let half_angle = half_angle(self.interlace_angle);
        let (sin, cos) = half_angle.sin_cos();
        let developed_width = developed_width(self.side_lengths, self.interlace_angle);
        let scaled_step = self.width / self.slice_count as f64;
        let scale = scaled_step / developed_width;
        let length1 = self.side_lengths[0] * scale;
        let length2 = self.side_lengths[1] * scale;
        let height = self.width / self.aspect_ratio;

        let v1 = DVec3::new(cos, 0.0, -sin);
        let v2 = DVec3::new(cos, 0.0, sin);
        let pitch = length1 * v1 + length2 * v2;
        let axis = pitch.normalize();
        let ridge_offset = 0.5 * length1 * v1 + 0.5 * length2 * v2;

        let pairs = (0..self.slice_count)
            .map(|slice| {
                let base = slice as f64 * pitch;
                FacetPair {
                    slice,
                    width1: length1,
                    width2: length2,
                    height,
                    rotation1: half_angle,
                    rotation2: -half_angle,
                    translation1: base,
                    translation2: ridge_offset + base,
                }
            })
            .collect();

        debug!(
            slices = self.slice_count,
            half_angle,
            developed_width,
            scaled_step,
            length1,
            length2,
            height,
            "built facet layout"
        );

        Ok(LentilLayout {
            half_angle,
            developed_width,
            scaled_step,
            scale,
            length1,
            length2,
            height,
            axis,
            pitch,
            pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, SQRT_2};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_right_angle_scenario() {
        let layout = FacetLayoutBuilder::new(9.0, 9)
            .with_aspect_ratio(3.0)
            .build()
            .unwrap();
        assert!((layout.half_angle - FRAC_PI_4).abs() < TOL);
        assert!((layout.developed_width - SQRT_2).abs() < TOL);
        assert!((layout.scaled_step - 1.0).abs() < TOL);
        assert!((layout.length1 - FRAC_1_SQRT_2).abs() < TOL);
        assert!((layout.length2 - FRAC_1_SQRT_2).abs() < TOL);
        assert!((layout.height - 3.0).abs() < TOL);
        assert!((layout.axis - DVec3::X).length() < TOL);

        for pair in &layout.pairs {
            assert!((pair.rotation1 - FRAC_PI_4).abs() < TOL);
            assert!((pair.rotation2 + FRAC_PI_4).abs() < TOL);
            assert!((pair.translation1 - DVec3::new(pair.slice as f64, 0.0, 0.0)).length() < TOL);
            let expected = DVec3::new(pair.slice as f64 + 0.5, 0.0, 0.0);
            assert!((pair.translation2 - expected).length() < TOL);
        }
    }

    #[test]
    fn test_facets_meet_at_ridge() {
        let layout = FacetLayoutBuilder::new(4.0, 3)
            .with_side_lengths(2.0, 0.5)
            .with_interlace_angle(1.1)
            .build()
            .unwrap();
        for pair in &layout.pairs {
            let [first, second] = pair.facets();
            let (_, ridge) = first.edges();
            let (near, _) = second.edges();
            assert!((ridge - near).length() < 1e-9);
        }
        for window in layout.pairs.windows(2) {
            let (_, far) = window[0].facets()[1].edges();
            let (near, _) = window[1].facets()[0].edges();
            assert!((far - near).length() < 1e-9);
        }
    }

    #[test]
    fn test_unequal_sides_step_by_pitch() {
        let layout = FacetLayoutBuilder::new(4.0, 3)
            .with_side_lengths(2.0, 0.5)
            .with_interlace_angle(1.1)
            .build()
            .unwrap();
        for window in layout.pairs.windows(2) {
            let step = window[1].translation1 - window[0].translation1;
            assert!((step - layout.pitch).length() < 1e-9);
        }
        assert!((layout.pitch.x - layout.scaled_step).abs() < 1e-9);
        assert!(layout.pitch.z.abs() > 1e-3);
        assert!(layout.pitch.length() > layout.scaled_step + 1e-3);
        assert!((layout.span() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertices_follow_plane_order() {
        let facet = FacetGeometry {
            width: 2.0,
            height: 4.0,
            rotation_y: 0.0,
            translation: DVec3::new(1.0, 0.0, 0.0),
        };
        let v = facet.vertices();
        assert_eq!(v[0].position, DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(v[3].position, DVec3::new(2.0, -2.0, 0.0));
        assert_eq!(v[0].uv, [0.0, 1.0]);
        assert_eq!(v[3].uv, [1.0, 0.0]);
        assert_eq!(facet.indices(), [0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn test_rotation_direction() {
        let facet = FacetGeometry {
            width: 2.0,
            height: 1.0,
            rotation_y: FRAC_PI_4,
            translation: DVec3::ZERO,
        };
        let (_, right) = facet.edges();
        // +half_angle tilts the facet towards -Z
        assert!((right - DVec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2)).length() < TOL);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            FacetLayoutBuilder::new(9.0, 0).build(),
            Err(ConfigError::InvalidSliceCount(0))
        );
        assert_eq!(
            FacetLayoutBuilder::new(9.0, 3)
                .with_interlace_angle(0.0)
                .build(),
            Err(ConfigError::InterlaceAngleOutOfRange(0.0))
        );
        assert_eq!(
            FacetLayoutBuilder::new(9.0, 3)
                .with_side_lengths(1.0, -1.0)
                .build(),
            Err(ConfigError::NonPositiveSideLength {
                face: 1,
                value: -1.0
            })
        );
    }
}
