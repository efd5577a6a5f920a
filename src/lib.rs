pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;

pub use error::{FontError, GenerationError};
pub use models::{derive_filename, Color, GeneratorConfig, HeroSpec, PatternSpec, PlaceholderSpec};
pub use pipeline::{DebugConfig, Pipeline, RenderContext, RenderStep};
pub use render::{save_jpeg, BatchFailure, BatchSummary, PlaceholderGenerator, RunReport};
