use image::RgbImage;
use placegen::render::text::BitmapProvider;
use placegen::{GeneratorConfig, PlaceholderGenerator};
use std::path::Path;

/// Default run configuration writing into `dir`
pub fn config_in(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::default().with_output_dir(dir.join("assets"))
}

/// Generator that never touches system fonts
pub fn bitmap_generator(config: &GeneratorConfig) -> PlaceholderGenerator<'_> {
    PlaceholderGenerator::with_provider(config, &BitmapProvider)
}

/// Decode a generated JPEG back into RGB pixels
pub fn load_rgb(path: &Path) -> RgbImage {
    image::open(path)
        .expect("Failed to decode generated image")
        .to_rgb8()
}

/// Per-channel distance allowing for JPEG loss
pub fn close_to(actual: &image::Rgb<u8>, expected: [u8; 3], tolerance: u8) -> bool {
    actual
        .0
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= tolerance)
}
