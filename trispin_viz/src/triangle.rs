use ultraviolet::Vec3;

/// The vertices of the triangle in clip space: top, bottom-left, bottom-right.
pub const TRIANGLE_POSITIONS: [Vec3; 3] = [
    Vec3 {
        x: 0.0,
        y: 0.5,
        z: 0.0,
    },
    Vec3 {
        x: -0.5,
        y: -0.5,
        z: 0.0,
    },
    Vec3 {
        x: 0.5,
        y: -0.5,
        z: 0.0,
    },
];

/// The initial RGB color of the triangle.
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 0.5, 0.2];

/// The RGBA color the frame is cleared to before drawing.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Clamps each channel of an RGB color into `[0, 1]`.
///
/// NaN channels become 0.
pub fn clamp_color(color: [f32; 3]) -> [f32; 3] {
    color.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
}
