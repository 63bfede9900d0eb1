//! Error type shared by every stage of the generator.

use std::io;
use std::path::PathBuf;

use resvg::usvg;

/// Errors raised while rendering, saving, or documenting logo batches.
///
/// Every variant is fatal for the batch that raised it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source SVG could not be read from disk.
    #[error("failed to read source asset {}: {source}", path.display())]
    ReadAsset { path: PathBuf, source: io::Error },

    /// A source SVG was read but could not be parsed.
    #[error("failed to parse source asset {}: {source}", path.display())]
    ParseSvg { path: PathBuf, source: usvg::Error },

    /// A render request that cannot produce an image.
    #[error("invalid render spec: {0}")]
    InvalidSpec(String),

    /// resvg refused to allocate a pixmap of the given size.
    #[error("failed to allocate a {width}x{height} pixmap")]
    Raster { width: u32, height: u32 },

    /// An output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// A PNG could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The PNG encoder rejected an image.
    #[error("failed to encode {filename}: {source}")]
    Encode {
        filename: String,
        source: image::ImageError,
    },

    /// The README template could not be read.
    #[error("failed to read README template {}: {source}", path.display())]
    ReadTemplate { path: PathBuf, source: io::Error },

    /// The README template has unbalanced braces or unknown placeholders.
    #[error("malformed README template: {0}")]
    Template(String),

    /// A config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    /// A config file is not valid JSON for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}")]
    Color(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
