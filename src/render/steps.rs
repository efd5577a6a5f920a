use crate::error::Result;
use crate::models::Color;
use crate::pipeline::{RenderContext, RenderStep};
use crate::render::{fill, text};
use crate::render::text::Typeface;
use image::RgbImage;
use std::sync::Arc;

/// Vertical gradient from `base` toward white
pub struct GradientStep {
    pub base: Color,
    pub blend_strength: f32,
}

impl RenderStep for GradientStep {
    fn apply(&self, canvas: &mut RgbImage, _context: &RenderContext) -> Result<()> {
        fill::fill_gradient(canvas, self.base, self.blend_strength);
        Ok(())
    }

    fn name(&self) -> &str {
        "Gradient"
    }
}

/// White background with square tiles on a regular grid
pub struct TilePatternStep {
    pub base: Color,
    pub tile: u32,
    pub spacing: u32,
}

impl RenderStep for TilePatternStep {
    fn apply(&self, canvas: &mut RgbImage, _context: &RenderContext) -> Result<()> {
        fill::fill_tiled_pattern(canvas, self.base, self.tile, self.spacing);
        Ok(())
    }

    fn name(&self) -> &str {
        "Tile Pattern"
    }
}

/// Centred text label
pub struct TextOverlayStep {
    pub text: String,
    pub color: Color,
    pub face: Arc<dyn Typeface>,
}

impl RenderStep for TextOverlayStep {
    fn apply(&self, canvas: &mut RgbImage, context: &RenderContext) -> Result<()> {
        let block =
            text::overlay_centered_text(canvas, self.face.as_ref(), &self.text, self.color.into());

        if context.verbose {
            log::info!(
                "  text {:?} ({}) measured {}x{}",
                self.text,
                self.face.name(),
                block.width,
                block.height
            );
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "Text Overlay"
    }
}
