use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::models::Color;

/// Colour of gradient row `row` on a canvas `height` rows tall.
///
/// Each channel moves from `base` toward white by `(row / height) * blend_strength`
/// and is truncated toward zero, so row 0 is exactly `base`.
pub fn gradient_row_color(base: Color, row: u32, height: u32, blend_strength: f32) -> Rgb<u8> {
    let t = row as f64 / height as f64;
    let s = blend_strength as f64;
    let channel = |c: u8| {
        let c = c as f64;
        (c + (255.0 - c) * t * s).clamp(0.0, 255.0) as u8
    };
    Rgb([channel(base.r), channel(base.g), channel(base.b)])
}

/// Paint a vertical gradient over the whole canvas, one full-width row at a time
pub fn fill_gradient(canvas: &mut RgbImage, base: Color, blend_strength: f32) {
    let height = canvas.height();
    for (y, row) in canvas.enumerate_rows_mut() {
        let color = gradient_row_color(base, y, height, blend_strength);
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }
}

/// Allocate a canvas and fill it with a top-to-bottom gradient
pub fn generate_gradient_canvas(
    width: u32,
    height: u32,
    base: Color,
    blend_strength: f32,
) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, base.into());
    fill_gradient(&mut canvas, base, blend_strength);
    canvas
}

/// Paint white, then a `tile`×`tile` square of `base` at every origin of a
/// `spacing` grid
pub fn fill_tiled_pattern(canvas: &mut RgbImage, base: Color, tile: u32, spacing: u32) {
    let white: Rgb<u8> = Color::WHITE.into();
    for pixel in canvas.pixels_mut() {
        *pixel = white;
    }

    if tile == 0 || spacing == 0 {
        return;
    }

    let (width, height) = canvas.dimensions();
    for i in (0..width).step_by(spacing as usize) {
        for j in (0..height).step_by(spacing as usize) {
            let rect = Rect::at(i as i32, j as i32).of_size(tile, tile);
            draw_filled_rect_mut(canvas, rect, base.into());
        }
    }
}

/// Allocate a square canvas with 20px tiles on a 40px grid
pub fn generate_tiled_pattern(size: u32, base: Color) -> RgbImage {
    let mut canvas = RgbImage::new(size, size);
    fill_tiled_pattern(&mut canvas, base, 20, 40);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_is_base_color() {
        let canvas = generate_gradient_canvas(10, 50, Color::PRIMARY, 0.3);
        for x in 0..10 {
            assert_eq!(*canvas.get_pixel(x, 0), Rgb([158, 128, 97]));
        }
    }

    #[test]
    fn test_gradient_matches_truncated_formula() {
        // 158 + 97 * 0.5 * 0.2 = 167.7 -> 167
        assert_eq!(
            gradient_row_color(Color::PRIMARY, 300, 600, 0.2),
            Rgb([167, 140, 112])
        );
    }

    #[test]
    fn test_last_row_bounded_by_blend_strength() {
        let height = 800;
        let canvas = generate_gradient_canvas(4, height, Color::PRIMARY, 0.3);
        let last = canvas.get_pixel(0, height - 1);
        let base = [158u8, 128, 97];

        for c in 0..3 {
            let max_shift = ((255 - base[c]) as f32 * 0.3).ceil() as u8;
            assert!(last[c] > base[c]);
            assert!(last[c] - base[c] <= max_shift);
            assert!(last[c] < 255);
        }
    }

    #[test]
    fn test_gradient_rows_are_uniform_and_monotonic() {
        let canvas = generate_gradient_canvas(7, 100, Color::PRIMARY, 0.2);
        let mut previous = *canvas.get_pixel(0, 0);
        for y in 0..100 {
            let first = *canvas.get_pixel(0, y);
            assert!((0..7).all(|x| *canvas.get_pixel(x, y) == first));
            assert!((0..3).all(|c| first[c] >= previous[c]));
            previous = first;
        }
    }

    #[test]
    fn test_tiled_pattern_layout() {
        let canvas = generate_tiled_pattern(400, Color::PRIMARY);
        let primary: Rgb<u8> = Color::PRIMARY.into();
        let white: Rgb<u8> = Color::WHITE.into();

        for y in 0..400 {
            for x in 0..400 {
                let expected = if x % 40 < 20 && y % 40 < 20 { primary } else { white };
                assert_eq!(*canvas.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_tiled_pattern_clips_partial_tiles() {
        let canvas = generate_tiled_pattern(50, Color::PRIMARY);
        let primary: Rgb<u8> = Color::PRIMARY.into();
        let white: Rgb<u8> = Color::WHITE.into();
        assert_eq!(*canvas.get_pixel(45, 45), primary);
        assert_eq!(*canvas.get_pixel(49, 49), primary);
        assert_eq!(*canvas.get_pixel(30, 45), white);
    }
}
