//! Error types for placeholder generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a scalable font.
///
/// These never escape the generator: callers fall back to the built-in
/// bitmap typeface via [`crate::render::text::load_or_default`].
#[derive(Error, Debug)]
pub enum FontError {
    /// The font file exists but could not be read
    #[error("failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable TrueType/OpenType font
    #[error("invalid font data in {}", path.display())]
    Parse { path: PathBuf },

    /// None of the candidate locations contained the font
    #[error("font not found (searched {} locations)", candidates.len())]
    NotFound { candidates: Vec<PathBuf> },
}

/// Errors raised while rendering or writing a single image
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Canvas dimensions must both be non-zero
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// Output directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be opened or flushed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JPEG encoding failed
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Debug dump of an intermediate canvas failed
    #[error("failed to save debug image {}: {source}", path.display())]
    Debug {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Debug directory was not empty
    #[error("debug directory is not empty: {}", path.display())]
    DebugDirNotEmpty { path: PathBuf },
}

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;
