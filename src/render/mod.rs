pub mod fill;
pub mod steps;
pub mod text;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{GenerationError, Result};
use crate::models::{GeneratorConfig, PlaceholderSpec};
use crate::pipeline::{DebugConfig, Pipeline};
use steps::{GradientStep, TextOverlayStep, TilePatternStep};
use text::{FontProvider, TrueTypeProvider, Typeface};

/// Encode `canvas` as JPEG at `path`, creating the parent directory if needed.
/// An existing file is overwritten.
pub fn save_jpeg(canvas: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| GenerationError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    canvas
        .write_with_encoder(encoder)
        .map_err(|source| GenerationError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    writer.flush().map_err(|source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A placeholder that could not be produced
#[derive(Debug)]
pub struct BatchFailure {
    pub label: String,
    pub error: GenerationError,
}

/// Outcome of the generic placeholder batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub created: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a full run: the two fixed images plus the batch
#[derive(Debug)]
pub struct RunReport {
    pub hero: PathBuf,
    pub pattern: PathBuf,
    pub batch: BatchSummary,
}

impl RunReport {
    pub fn total_created(&self) -> usize {
        2 + self.batch.succeeded()
    }
}

/// Builds and saves every image described by a [`GeneratorConfig`]
pub struct PlaceholderGenerator<'a> {
    config: &'a GeneratorConfig,
    hero_face: Arc<dyn Typeface>,
    label_face: Arc<dyn Typeface>,
    verbose: bool,
    debug: Option<DebugConfig>,
}

impl<'a> PlaceholderGenerator<'a> {
    /// Use the configured scalable font, falling back to the bitmap font
    pub fn new(config: &'a GeneratorConfig) -> Self {
        let provider = TrueTypeProvider::new(&config.font_path);
        Self::with_provider(config, &provider)
    }

    pub fn with_provider(config: &'a GeneratorConfig, provider: &dyn FontProvider) -> Self {
        Self {
            config,
            hero_face: text::load_or_default(provider, config.hero.font_size),
            label_face: text::load_or_default(provider, config.placeholder_font_size),
            verbose: false,
            debug: None,
        }
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Dump intermediate canvases for every image
    pub fn with_debug(mut self, debug: Option<DebugConfig>) -> Self {
        self.debug = debug;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Create the output directory (idempotent)
    pub fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir).map_err(|source| GenerationError::CreateDir {
            path: dir.clone(),
            source,
        })
    }

    fn pipeline(&self, label: &str, width: u32, height: u32) -> Pipeline {
        Pipeline::new(width, height)
            .with_label(label)
            .with_background(self.config.primary)
            .with_verbose(self.verbose)
            .with_debug(self.debug.clone())
    }

    pub fn hero_pipeline(&self) -> Pipeline {
        let hero = &self.config.hero;
        self.pipeline(&hero.filename, hero.width, hero.height)
            .add_step_boxed(Box::new(GradientStep {
                base: self.config.primary,
                blend_strength: hero.blend_strength,
            }))
            .add_step_boxed(Box::new(TextOverlayStep {
                text: hero.title.clone(),
                color: self.config.text_color,
                face: self.hero_face.clone(),
            }))
    }

    pub fn pattern_pipeline(&self) -> Pipeline {
        let pattern = &self.config.pattern;
        self.pipeline(&pattern.filename, pattern.size, pattern.size)
            .add_step_boxed(Box::new(TilePatternStep {
                base: self.config.primary,
                tile: pattern.tile,
                spacing: pattern.spacing,
            }))
    }

    pub fn placeholder_pipeline(&self, spec: &PlaceholderSpec) -> Pipeline {
        self.pipeline(&spec.filename(), spec.width, spec.height)
            .add_step_boxed(Box::new(GradientStep {
                base: self.config.primary,
                blend_strength: self.config.placeholder_blend,
            }))
            .add_step_boxed(Box::new(TextOverlayStep {
                text: spec.label.clone(),
                color: self.config.text_color,
                face: self.label_face.clone(),
            }))
    }

    fn render_and_save(&self, pipeline: &Pipeline, filename: &str) -> Result<PathBuf> {
        let canvas = pipeline.run()?;
        let path = self.config.output_dir.join(filename);
        save_jpeg(&canvas, &path, self.config.quality)?;
        println!("✓ Created {}", path.display());
        Ok(path)
    }

    pub fn generate_hero(&self) -> Result<PathBuf> {
        self.render_and_save(&self.hero_pipeline(), &self.config.hero.filename)
    }

    pub fn generate_pattern(&self) -> Result<PathBuf> {
        self.render_and_save(&self.pattern_pipeline(), &self.config.pattern.filename)
    }

    pub fn generate_placeholder(&self, spec: &PlaceholderSpec) -> Result<PathBuf> {
        self.render_and_save(&self.placeholder_pipeline(spec), &spec.filename())
    }

    /// Generate every configured placeholder. A failure is recorded and the
    /// batch moves on to the next item.
    pub fn generate_batch(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for spec in &self.config.placeholders {
            match self.generate_placeholder(spec) {
                Ok(path) => summary.created.push(path),
                Err(error) => {
                    eprintln!("✗ Error creating {}: {}", spec.label, error);
                    summary.failures.push(BatchFailure {
                        label: spec.label.clone(),
                        error,
                    });
                }
            }
        }

        summary
    }

    /// Hero and pattern first (errors propagate), then the isolated batch
    pub fn run_all(&self) -> Result<RunReport> {
        self.prepare_output_dir()?;
        let hero = self.generate_hero()?;
        let pattern = self.generate_pattern()?;
        let batch = self.generate_batch();

        Ok(RunReport {
            hero,
            pattern,
            batch,
        })
    }
}
