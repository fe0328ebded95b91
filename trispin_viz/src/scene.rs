use std::time::Duration;

use ultraviolet::Mat4;

use crate::{clamp_color, DEFAULT_COLOR};

/// The state needed to draw one frame of the triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleScene {
    color: [f32; 3],
    rotation: f32,
}

impl Default for TriangleScene {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            rotation: 0.0,
        }
    }
}

impl TriangleScene {
    /// Creates a scene with the default color and no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color shared by all three vertices.
    ///
    /// Channels are clamped to `[0, 1]`.
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = clamp_color(color);
        self
    }

    /// Sets the rotation about the z axis, in radians.
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Sets the rotation from the time since the window opened, turning at
    /// one radian per second.
    pub fn at_time(self, elapsed: Duration) -> Self {
        self.with_rotation(elapsed.as_secs_f32())
    }

    /// The RGB color of the triangle.
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    /// The rotation about the z axis, in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// The per-vertex colors, in the same order as
    /// [TRIANGLE_POSITIONS](crate::TRIANGLE_POSITIONS).
    pub fn vertex_colors(&self) -> [[f32; 3]; 3] {
        [self.color; 3]
    }

    /// The model transform applied in the vertex shader.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation)
    }
}

#[cfg(test)]
mod test {
    use std::f32::consts::{PI, TAU};

    use ultraviolet::{Vec3, Vec4};

    use super::*;
    use crate::TRIANGLE_POSITIONS;

    fn assert_close(a: Vec4, b: Vec4) {
        assert!((a - b).mag() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_scene() {
        let scene = TriangleScene::new();
        assert_eq!(scene.color(), DEFAULT_COLOR);
        assert_eq!(scene.rotation(), 0.0);
        assert_eq!(scene.transform(), Mat4::identity());
    }

    #[test]
    fn test_vertex_colors_share_scene_color() {
        let scene = TriangleScene::new().with_color([0.1, 0.2, 0.3]);
        assert_eq!(scene.vertex_colors(), [[0.1, 0.2, 0.3]; 3]);

        let scene = TriangleScene::new().with_color([2.0, -1.0, 0.5]);
        assert_eq!(scene.vertex_colors(), [[1.0, 0.0, 0.5]; 3]);
    }

    #[test]
    fn test_rotation_follows_elapsed_time() {
        let scene = TriangleScene::new().at_time(Duration::from_millis(2500));
        assert!((scene.rotation() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_half_turn_negates_xy() {
        let transform = TriangleScene::new().with_rotation(PI).transform();
        for pos in TRIANGLE_POSITIONS {
            let rotated = transform * pos.into_homogeneous_point();
            assert_close(rotated, Vec4::new(-pos.x, -pos.y, pos.z, 1.0));
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        let transform = TriangleScene::new().with_rotation(TAU).transform();
        for pos in TRIANGLE_POSITIONS {
            let p = pos.into_homogeneous_point();
            assert_close(transform * p, p);
        }
    }

    #[test]
    fn test_rotation_preserves_length_and_depth() {
        for step in 0..16 {
            let transform = TriangleScene::new()
                .with_rotation(step as f32 * 0.41)
                .transform();
            for pos in TRIANGLE_POSITIONS {
                let rotated = transform * pos.into_homogeneous_point();
                let length = Vec3::new(rotated.x, rotated.y, rotated.z).mag();
                assert!((length - pos.mag()).abs() < 1e-5);
                assert!(rotated.z.abs() < 1e-6);
                assert!((rotated.w - 1.0).abs() < 1e-6);
            }
        }
    }
}
