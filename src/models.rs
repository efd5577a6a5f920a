use image::Rgb;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Brand colour used for gradients and pattern tiles
    pub const PRIMARY: Color = Color::new(158, 128, 97);

    pub const WHITE: Color = Color::new(255, 255, 255);
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        Color::new(pixel[0], pixel[1], pixel[2])
    }
}

/// One generic placeholder: a label drawn on a gradient of the given size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl PlaceholderSpec {
    pub fn new(label: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            label: label.into(),
            width,
            height,
        }
    }

    /// Output file name for this placeholder
    pub fn filename(&self) -> String {
        derive_filename(&self.label)
    }
}

/// The hero banner: gradient with a multi-line centred title
#[derive(Debug, Clone)]
pub struct HeroSpec {
    pub filename: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub blend_strength: f32,
    pub font_size: f32,
}

/// The tiled pattern background
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub filename: String,
    pub size: u32,
    pub tile: u32,
    pub spacing: u32,
}

/// Immutable configuration for one generator run.
///
/// `Default` reproduces the fixed asset set: the hero banner, the pattern
/// and eight labelled placeholders written into `src/assets`.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub primary: Color,
    pub text_color: Color,
    pub quality: u8,
    /// Preferred scalable font, tried before system font directories
    pub font_path: PathBuf,
    pub hero: HeroSpec,
    pub pattern: PatternSpec,
    pub placeholder_blend: f32,
    pub placeholder_font_size: f32,
    pub placeholders: Vec<PlaceholderSpec>,
}

impl GeneratorConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_font_path(mut self, font_path: impl Into<PathBuf>) -> Self {
        self.font_path = font_path.into();
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Every file name this configuration will produce, in run order
    pub fn output_filenames(&self) -> Vec<String> {
        let mut names = vec![self.hero.filename.clone(), self.pattern.filename.clone()];
        names.extend(self.placeholders.iter().map(PlaceholderSpec::filename));
        names
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("src/assets"),
            primary: Color::PRIMARY,
            text_color: Color::WHITE,
            quality: 85,
            font_path: PathBuf::from("arial.ttf"),
            hero: HeroSpec {
                filename: "herostudents.jpg".to_string(),
                title: "AL-FALAH-ONLINE\nIslamic Education".to_string(),
                width: 1200,
                height: 800,
                blend_strength: 0.3,
                font_size: 60.0,
            },
            pattern: PatternSpec {
                filename: "pattern-bg.jpg".to_string(),
                size: 400,
                tile: 20,
                spacing: 40,
            },
            placeholder_blend: 0.2,
            placeholder_font_size: 40.0,
            placeholders: vec![
                PlaceholderSpec::new("Class Experience", 1000, 600),
                PlaceholderSpec::new("Islamic Studies", 1000, 600),
                PlaceholderSpec::new("Student Collaboration", 1000, 600),
                PlaceholderSpec::new("Achievement Progress", 1000, 600),
                PlaceholderSpec::new("Virtual Teacher Student", 1200, 800),
                PlaceholderSpec::new("Bismillah", 600, 400),
                PlaceholderSpec::new("Hero Students", 1200, 800),
                PlaceholderSpec::new("Teacher Student 2", 1000, 700),
            ],
        }
    }
}

/// Derive an output file name from a label.
///
/// Lower-cases, turns spaces into hyphens, drops ampersands, then trims and
/// collapses the hyphen runs that dropping leaves behind.
pub fn derive_filename(label: &str) -> String {
    let slug = label.to_lowercase().replace(' ', "-").replace('&', "");

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.trim().chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    format!("{}.jpg", collapsed.trim_matches('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derive_filename_simple() {
        assert_eq!(derive_filename("Class Experience"), "class-experience.jpg");
        assert_eq!(derive_filename("Bismillah"), "bismillah.jpg");
        assert_eq!(derive_filename("Teacher Student 2"), "teacher-student-2.jpg");
    }

    #[test]
    fn test_derive_filename_ampersand_collapses() {
        assert_eq!(derive_filename("Teacher & Student"), "teacher-student.jpg");
        assert_eq!(derive_filename("&Co"), "co.jpg");
    }

    #[test]
    fn test_derive_filename_trims_whitespace() {
        assert_eq!(derive_filename("  Hero\t"), "hero.jpg");
    }

    #[test]
    fn test_default_config_filenames_unique() {
        let config = GeneratorConfig::default();
        let names = config.output_filenames();
        assert_eq!(names.len(), 10);

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_default_config_matches_asset_list() {
        let config = GeneratorConfig::default();
        let names = config.output_filenames();
        assert_eq!(
            names,
            vec![
                "herostudents.jpg",
                "pattern-bg.jpg",
                "class-experience.jpg",
                "islamic-studies.jpg",
                "student-collaboration.jpg",
                "achievement-progress.jpg",
                "virtual-teacher-student.jpg",
                "bismillah.jpg",
                "hero-students.jpg",
                "teacher-student-2.jpg",
            ]
        );
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(GeneratorConfig::default().with_quality(0).quality, 1);
        assert_eq!(GeneratorConfig::default().with_quality(200).quality, 100);
    }
}
