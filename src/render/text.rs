use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::FontError;

/// Vertical gap between lines of a multi-line block, in pixels
pub const LINE_SPACING: u32 = 4;

/// Pixel scale of the built-in bitmap font (8x8 glyphs drawn at 16x16)
pub const BITMAP_SCALE: u32 = 2;

/// Something that can measure and draw a single line of text
pub trait Typeface: Send + Sync {
    /// Width and height of one line of text
    fn measure(&self, line: &str) -> (u32, u32);

    /// Distance between the tops of consecutive lines, excluding spacing
    fn line_height(&self) -> u32;

    /// Draw one line with its top-left corner at `(x, y)`; off-canvas parts are clipped
    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, line: &str, color: Rgb<u8>);

    fn name(&self) -> &str;
}

/// Loads a typeface at a given pixel size
pub trait FontProvider {
    fn load(&self, size: f32) -> Result<Box<dyn Typeface>, FontError>;
}

/// A TrueType/OpenType font rendered through `imageproc`
pub struct ScalableTypeface {
    font: FontVec,
    scale: PxScale,
    name: String,
}

impl ScalableTypeface {
    pub fn from_bytes(data: Vec<u8>, size: f32, name: impl Into<String>) -> Option<Self> {
        let font = FontVec::try_from_vec(data).ok()?;
        Some(Self {
            font,
            scale: PxScale::from(size),
            name: name.into(),
        })
    }
}

impl Typeface for ScalableTypeface {
    fn measure(&self, line: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, line)
    }

    fn line_height(&self) -> u32 {
        self.font.as_scaled(self.scale).height().ceil() as u32
    }

    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, line: &str, color: Rgb<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, line);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The built-in 8x8 bitmap font, always available
#[derive(Debug, Clone, Copy)]
pub struct BitmapTypeface {
    pub scale: u32,
}

impl BitmapTypeface {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    fn cell(&self) -> u32 {
        8 * self.scale
    }
}

impl Default for BitmapTypeface {
    fn default() -> Self {
        Self::new(BITMAP_SCALE)
    }
}

impl Typeface for BitmapTypeface {
    fn measure(&self, line: &str) -> (u32, u32) {
        let chars = line.chars().count() as u32;
        (chars * self.cell(), self.cell())
    }

    fn line_height(&self) -> u32 {
        self.cell()
    }

    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, line: &str, color: Rgb<u8>) {
        let scale = self.scale as i32;
        let cell = self.cell() as i32;

        for (k, c) in line.chars().enumerate() {
            // Unknown characters still advance, drawn as blanks
            let Some(glyph) = BASIC_FONTS.get(c) else {
                continue;
            };
            let origin_x = x + k as i32 * cell;

            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let rect = Rect::at(origin_x + col * scale, y + row as i32 * scale)
                        .of_size(self.scale, self.scale);
                    draw_filled_rect_mut(canvas, rect, color);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "builtin-8x8"
    }
}

/// Always hands out the bitmap font, regardless of requested size
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapProvider;

impl FontProvider for BitmapProvider {
    fn load(&self, _size: f32) -> Result<Box<dyn Typeface>, FontError> {
        Ok(Box::new(BitmapTypeface::default()))
    }
}

/// Searches a list of candidate paths for a scalable font file
#[derive(Debug, Clone)]
pub struct TrueTypeProvider {
    candidates: Vec<PathBuf>,
}

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

impl TrueTypeProvider {
    /// Try `preferred` as given, then (for a bare file name) the usual
    /// system font directories
    pub fn new(preferred: impl Into<PathBuf>) -> Self {
        let preferred = preferred.into();
        let mut candidates = vec![preferred.clone()];

        if preferred.is_relative() {
            if let Some(file_name) = preferred.file_name() {
                candidates.extend(
                    SYSTEM_FONT_DIRS
                        .iter()
                        .map(|dir| Path::new(dir).join(file_name)),
                );
            }
        }

        Self { candidates }
    }

    /// Look at exactly one path
    pub fn only(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }
}

impl FontProvider for TrueTypeProvider {
    fn load(&self, size: f32) -> Result<Box<dyn Typeface>, FontError> {
        let Some(path) = self.candidates.iter().find(|p| p.is_file()) else {
            return Err(FontError::NotFound {
                candidates: self.candidates.clone(),
            });
        };

        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.clone(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let face = ScalableTypeface::from_bytes(data, size, name)
            .ok_or_else(|| FontError::Parse { path: path.clone() })?;
        log::debug!("loaded font {} at {}px", path.display(), size);
        Ok(Box::new(face))
    }
}

/// Load from `provider`, falling back to the bitmap font on any failure
pub fn load_or_default(provider: &dyn FontProvider, size: f32) -> Arc<dyn Typeface> {
    match provider.load(size) {
        Ok(face) => Arc::from(face),
        Err(err) => {
            log::warn!("{err}; using built-in bitmap font");
            Arc::new(BitmapTypeface::default())
        }
    }
}

/// Measured extent of a (possibly multi-line) block of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub width: u32,
    pub height: u32,
    pub line_widths: Vec<u32>,
    pub line_height: u32,
}

pub fn measure_block(face: &dyn Typeface, text: &str) -> TextBlock {
    let line_widths: Vec<u32> = text.split('\n').map(|l| face.measure(l).0).collect();
    let lines = line_widths.len() as u32;
    let line_height = face.line_height();

    TextBlock {
        width: line_widths.iter().copied().max().unwrap_or(0),
        height: lines * line_height + lines.saturating_sub(1) * LINE_SPACING,
        line_widths,
        line_height,
    }
}

/// Top-left corner that centres a `block_w`x`block_h` box on the canvas.
/// Uses floor division so oversized text lands at a negative offset.
pub fn centered_origin(canvas: (u32, u32), block_w: u32, block_h: u32) -> (i32, i32) {
    let x = (canvas.0 as i64 - block_w as i64).div_euclid(2);
    let y = (canvas.1 as i64 - block_h as i64).div_euclid(2);
    (x as i32, y as i32)
}

/// Draw `text` centred on the canvas; each line is centred within the block
pub fn overlay_centered_text(
    canvas: &mut RgbImage,
    face: &dyn Typeface,
    text: &str,
    color: Rgb<u8>,
) -> TextBlock {
    let block = measure_block(face, text);
    let (x0, y0) = centered_origin(canvas.dimensions(), block.width, block.height);

    for (idx, (line, width)) in text.split('\n').zip(&block.line_widths).enumerate() {
        let x = x0 + ((block.width - width) / 2) as i32;
        let y = y0 + (idx as u32 * (block.line_height + LINE_SPACING)) as i32;
        face.draw(canvas, x, y, line, color);
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_measure() {
        let face = BitmapTypeface::new(2);
        assert_eq!(face.measure("Bismillah"), (9 * 16, 16));
        assert_eq!(face.measure(""), (0, 16));
    }

    #[test]
    fn test_multiline_block_extent() {
        let face = BitmapTypeface::new(1);
        let block = measure_block(&face, "AB\nCDEF");
        assert_eq!(block.line_widths, vec![16, 32]);
        assert_eq!(block.width, 32);
        assert_eq!(block.height, 8 + 8 + LINE_SPACING);
    }

    #[test]
    fn test_centered_origin() {
        assert_eq!(centered_origin((100, 50), 40, 10), (30, 20));
        assert_eq!(centered_origin((11, 11), 4, 4), (3, 3));
        // Wider than the canvas: floor toward negative infinity
        assert_eq!(centered_origin((10, 10), 13, 10), (-2, 0));
    }

    #[test]
    fn test_overlay_stays_inside_centered_box() {
        let white = Rgb([255, 255, 255]);
        let mut canvas = RgbImage::from_pixel(200, 100, Rgb([0, 0, 0]));
        let face = BitmapTypeface::new(2);

        let block = overlay_centered_text(&mut canvas, &face, "HI", white);
        let (x0, y0) = centered_origin((200, 100), block.width, block.height);

        let mut painted = 0;
        for (x, y, pixel) in canvas.enumerate_pixels() {
            if *pixel == white {
                painted += 1;
                assert!(x as i32 >= x0 && (x as i32) < x0 + block.width as i32);
                assert!(y as i32 >= y0 && (y as i32) < y0 + block.height as i32);
            }
        }
        assert!(painted > 0);
    }

    #[test]
    fn test_overlay_clips_oversized_text() {
        let mut canvas = RgbImage::new(10, 10);
        let face = BitmapTypeface::new(4);
        overlay_centered_text(&mut canvas, &face, "WWWWW", Rgb([255, 0, 0]));
        assert_eq!(canvas.dimensions(), (10, 10));
    }

    #[test]
    fn test_missing_font_falls_back_to_bitmap() {
        let dir = tempfile::TempDir::new().unwrap();
        let provider = TrueTypeProvider::only(dir.path().join("nope.ttf"));

        assert!(matches!(
            provider.load(40.0),
            Err(FontError::NotFound { .. })
        ));
        assert_eq!(load_or_default(&provider, 40.0).name(), "builtin-8x8");
    }

    #[test]
    fn test_garbage_font_falls_back_to_bitmap() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let provider = TrueTypeProvider::only(&path);
        assert!(matches!(provider.load(60.0), Err(FontError::Parse { .. })));
        assert_eq!(load_or_default(&provider, 60.0).name(), "builtin-8x8");
    }

    #[test]
    fn test_bare_name_searches_system_dirs() {
        let provider = TrueTypeProvider::new("arial.ttf");
        assert_eq!(provider.candidates()[0], PathBuf::from("arial.ttf"));
        assert!(provider.candidates().len() > 1);

        let absolute = TrueTypeProvider::new("/opt/fonts/custom.ttf");
        assert_eq!(absolute.candidates().len(), 1);
    }
}
