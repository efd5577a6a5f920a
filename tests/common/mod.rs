mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from placegen for tests
pub use placegen::{
    BatchSummary, Color, GenerationError, GeneratorConfig, PlaceholderGenerator, PlaceholderSpec,
    RunReport,
};
