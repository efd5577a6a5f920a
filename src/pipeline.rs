use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{GenerationError, Result};
use crate::models::Color;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

impl DebugConfig {
    /// Prepare a debug directory. It must be empty or non-existent.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();

        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir).map_err(|source| {
                GenerationError::Io {
                    path: output_dir.clone(),
                    source,
                }
            })?;
            if entries.next().is_some() {
                return Err(GenerationError::DebugDirNotEmpty { path: output_dir });
            }
        } else {
            std::fs::create_dir_all(&output_dir).map_err(|source| GenerationError::CreateDir {
                path: output_dir.clone(),
                source,
            })?;
        }

        Ok(Self {
            output_dir,
            enabled: true,
        })
    }
}

/// Context available to all render steps
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

/// A single drawing pass over a canvas
pub trait RenderStep: Send + Sync {
    /// Paint onto the canvas in place
    fn apply(&self, canvas: &mut RgbImage, context: &RenderContext) -> Result<()>;

    /// Human-readable name for this step (used in verbose output)
    fn name(&self) -> &str;
}

/// Composable render pipeline builder.
///
/// A pipeline owns the canvas size and background; `run` allocates the
/// canvas, applies every step once in order and hands the result back.
pub struct Pipeline {
    /// Debug dumps for this pipeline go under `<debug dir>/<label>/`
    label: String,
    width: u32,
    height: u32,
    background: Color,
    steps: Vec<Arc<dyn RenderStep>>,
    context: RenderContext,
}

impl Pipeline {
    /// Create a new pipeline for a canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            label: "canvas".to_string(),
            width,
            height,
            background: Color::WHITE,
            steps: Vec::new(),
            context: RenderContext::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Dump every intermediate canvas into an already prepared debug directory
    pub fn with_debug(mut self, debug: Option<DebugConfig>) -> Self {
        self.context.debug = debug;
        self
    }

    /// Add a render step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn RenderStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn RenderStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step and return the finished canvas
    pub fn run(&self) -> Result<RgbImage> {
        self.run_partial(self.steps.len())
    }

    /// Run only the first `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, num_steps: usize) -> Result<RgbImage> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }

        let mut canvas = RgbImage::from_pixel(self.width, self.height, self.background.into());
        self.save_debug_output(&canvas, 0, "blank")?;

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            let started = Instant::now();
            step.apply(&mut canvas, &self.context)?;

            if self.context.verbose {
                log::info!(
                    "{}: {} took {:.1?}",
                    self.label,
                    step.name(),
                    started.elapsed()
                );
            }

            self.save_debug_output(&canvas, step_idx + 1, step.name())?;
        }

        Ok(canvas)
    }

    /// Save debug output if debug mode is enabled
    fn save_debug_output(&self, canvas: &RgbImage, index: usize, step_name: &str) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };
        if !debug_config.enabled {
            return Ok(());
        }

        let image_dir = debug_config.output_dir.join(debug_stem(&self.label));
        std::fs::create_dir_all(&image_dir).map_err(|source| GenerationError::CreateDir {
            path: image_dir.clone(),
            source,
        })?;

        let filename = format!(
            "{:02}_{}.png",
            index,
            step_name.to_lowercase().replace(' ', "_")
        );
        let output_path = image_dir.join(&filename);
        canvas
            .save(&output_path)
            .map_err(|source| GenerationError::Debug {
                path: output_path.clone(),
                source,
            })?;

        log::debug!("saved debug canvas {}", output_path.display());
        Ok(())
    }
}

/// Directory name for a pipeline's debug dumps: its label without extension
fn debug_stem(label: &str) -> String {
    Path::new(label)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| label.to_string())
}
