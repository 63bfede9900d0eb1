//! logo-renderer: batch rendering of logo variants from source SVGs
//!
//! This crate rasterizes a small family of vector logos into square PNGs at
//! fixed sizes, on transparent or palette-colored backgrounds, optionally
//! flattened to a single color, and writes a preview README for each batch.
//!
//! # Example
//!
//! ```no_run
//! use logo_renderer::{Color, LogoPipeline, LogoVariant, RenderSpec};
//!
//! let mut pipeline = LogoPipeline::new("logo/source");
//!
//! let spec = RenderSpec::new(512, LogoVariant::Light, Color::DARK)
//!     .with_brackets(false)
//!     .with_width_multiplier(0.7);
//! let logo = pipeline.render(&spec)?;
//!
//! assert_eq!(logo.image.dimensions(), (512, 512));
//! logo.with_inverted_label(true).save("logo/simple")?;
//! # Ok::<(), logo_renderer::Error>(())
//! ```
//!
//! # Presets
//!
//! Whole folders are produced by [`LogoGenerator`] from a [`Preset`]:
//!
//! ```no_run
//! use logo_renderer::{GeneratorConfig, LogoGenerator};
//!
//! let config = GeneratorConfig::load("logo/config.json")?.with_root("logo");
//! let mut generator = LogoGenerator::new(config);
//! for report in generator.generate_all()? {
//!     println!("{}", report.summary());
//! }
//! # Ok::<(), logo_renderer::Error>(())
//! ```

mod color;
mod config;
mod error;
mod generator;
mod logo;
mod pipeline;
mod preset;
mod raster;
mod readme;

pub use color::Color;
pub use config::{DEFAULT_SIZES, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::{BatchReport, LogoGenerator, SavedFile};
pub use logo::{FileLabel, LogoVariant, RenderedLogo, Shade, SizePx, classify};
pub use pipeline::{DEFAULT_WIDTH_MULTIPLIER, LogoPipeline, RenderSpec};
pub use preset::{Preset, PresetPass};
pub use raster::{SvgAsset, canvas, center_offset, compose_centered, mono_overlay, paste_masked};
pub use readme::{DEFAULT_LINK_BASE, PreviewEntry, ReadmeTemplate, group_thousands, preview_table};
