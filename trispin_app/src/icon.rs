use image::{Rgba, RgbaImage};
use trispin_viz::{Vec3, DEFAULT_COLOR, TRIANGLE_POSITIONS};
use winit::window::{BadIcon, Icon};

const ICON_SIZE: u32 = 32;

/// Rasterizes the triangle in its default color onto a transparent square.
pub fn icon_image(size: u32) -> RgbaImage {
    let [red, green, blue] = DEFAULT_COLOR.map(|c| (c * 255.0).round() as u8);
    // Map clip space [-1, 1] onto the image, flipping y. The triangle spans
    // [-0.5, 0.5], so scale it up to fill the icon.
    let to_pixels = |p: Vec3| {
        let s = size as f32;
        [(p.x + 0.5) * s, (0.5 - p.y) * s]
    };
    let [top, left, right] = TRIANGLE_POSITIONS.map(to_pixels);

    RgbaImage::from_fn(size, size, |x, y| {
        let p = [x as f32 + 0.5, y as f32 + 0.5];
        if inside_triangle(p, top, left, right) {
            Rgba([red, green, blue, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn edge(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

fn inside_triangle(p: [f32; 2], a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let d0 = edge(p, a, b);
    let d1 = edge(p, b, c);
    let d2 = edge(p, c, a);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

pub fn window_icon() -> Result<Icon, BadIcon> {
    let image = icon_image(ICON_SIZE);
    let width = image.width();
    let height = image.height();
    Icon::from_rgba(image.into_raw(), width, height)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_window_icon() {
        assert!(window_icon().is_ok());
    }

    #[test]
    fn test_icon_image() {
        let image = icon_image(ICON_SIZE);
        assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));

        // Center is filled, top corners are clear.
        assert_eq!(image.get_pixel(16, 20), &Rgba([255, 128, 51, 255]));
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(ICON_SIZE - 1, 0)[3], 0);

        // The apex is at the top middle, the base along the bottom row.
        assert_eq!(image.get_pixel(16, 2)[3], 255);
        assert_eq!(image.get_pixel(10, 2)[3], 0);
        assert_eq!(image.get_pixel(1, ICON_SIZE - 1)[3], 255);
    }
}
