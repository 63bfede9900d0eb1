//! The composition pipeline: one [`RenderSpec`] in, one [`RenderedLogo`] out.
//!
//! ```text
//! source SVG ──► rasterize at logo size ──► (mono overlay) ──► center on canvas
//!      │
//!      └── native size, memoized per asset path
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use serde::Serialize;
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::logo::{LogoVariant, RenderedLogo, SizePx};
use crate::raster::{self, SvgAsset};

/// Fraction of the canvas width the logo occupies when a preset does not
/// choose its own.
pub const DEFAULT_WIDTH_MULTIPLIER: f64 = 0.8;

// ============================================================================
// RenderSpec
// ============================================================================

/// Everything needed to produce a single render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSpec {
    /// Width and height of the square canvas.
    pub size: u32,
    /// Artwork to draw.
    pub variant: LogoVariant,
    /// Canvas fill.
    pub background: Color,
    /// Use the bracketed artwork. Ignored for favicons.
    pub brackets: bool,
    /// Flatten the artwork to this color.
    pub mono: Option<Color>,
    /// Fraction of the canvas width taken by the logo, in (0, 1).
    pub width_multiplier: f64,
}

impl RenderSpec {
    /// Creates a bracketed, full-color spec at the default width multiplier.
    pub fn new(size: u32, variant: LogoVariant, background: Color) -> Self {
        Self {
            size,
            variant,
            background,
            brackets: true,
            mono: None,
            width_multiplier: DEFAULT_WIDTH_MULTIPLIER,
        }
    }

    /// Chooses between bracketed and plain artwork.
    pub fn with_brackets(mut self, brackets: bool) -> Self {
        self.brackets = brackets;
        self
    }

    /// Sets or clears the flattening color.
    pub fn with_mono(mut self, mono: Option<Color>) -> Self {
        self.mono = mono;
        self
    }

    /// Sets the logo width as a fraction of the canvas width.
    pub fn with_width_multiplier(mut self, multiplier: f64) -> Self {
        self.width_multiplier = multiplier;
        self
    }

    /// Width of the logo on the canvas, rounded down.
    pub fn logo_width(&self) -> u32 {
        (self.size as f64 * self.width_multiplier) as u32
    }

    /// Checks that the spec can produce a non-empty logo on a non-empty canvas.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSpec("canvas size must be positive".into()));
        }
        if !(self.width_multiplier > 0.0 && self.width_multiplier < 1.0) {
            return Err(Error::InvalidSpec(format!(
                "width multiplier {} is outside (0, 1)",
                self.width_multiplier
            )));
        }
        if self.logo_width() == 0 {
            return Err(Error::InvalidSpec(format!(
                "logo would be zero pixels wide on a {}px canvas",
                self.size
            )));
        }
        Ok(())
    }
}

// ============================================================================
// LogoPipeline
// ============================================================================

/// Renders [`RenderSpec`]s from a directory of source SVGs.
///
/// Native asset sizes are measured once per path and reused for every later
/// size computation within the pipeline's lifetime.
pub struct LogoPipeline {
    source_dir: PathBuf,
    native_sizes: HashMap<PathBuf, SizePx>,
}

impl LogoPipeline {
    /// Creates a pipeline reading source SVGs from `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            native_sizes: HashMap::new(),
        }
    }

    /// Directory the source SVGs are read from.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Path of the source SVG for a variant.
    pub fn asset_path(&self, variant: LogoVariant, brackets: bool) -> PathBuf {
        self.source_dir.join(variant.source_file_name(brackets))
    }

    /// Returns the native size of the source SVG for a variant, reading and
    /// measuring it only the first time its path is seen.
    pub fn native_size(&mut self, variant: LogoVariant, brackets: bool) -> Result<SizePx> {
        let path = self.asset_path(variant, brackets);
        if let Some(size) = self.native_sizes.get(&path) {
            return Ok(*size);
        }
        let asset = SvgAsset::load(&path)?;
        Ok(self.measure(&asset))
    }

    /// Number of assets whose native size has been measured.
    pub fn cached_sizes(&self) -> usize {
        self.native_sizes.len()
    }

    /// Scales a variant's artwork to `target_width`, deriving the height from
    /// its aspect ratio.
    pub fn logo_size(
        &mut self,
        variant: LogoVariant,
        brackets: bool,
        target_width: u32,
    ) -> Result<SizePx> {
        let native = self.native_size(variant, brackets)?;
        Ok(scale_to_width(native, target_width))
    }

    /// Memoized native size of an asset loaded from `source_dir`.
    fn measure(&mut self, asset: &SvgAsset) -> SizePx {
        if let Some(size) = self.native_sizes.get(asset.path()) {
            return *size;
        }
        let size = asset.native_size();
        debug!(
            path = %asset.path().display(),
            width = size.width,
            height = size.height,
            "measured native asset size"
        );
        self.native_sizes.insert(asset.path().to_path_buf(), size);
        size
    }

    /// Rasterizes the logo artwork for `spec` at its target size.
    pub fn render_logo(&mut self, spec: &RenderSpec) -> Result<RgbaImage> {
        let asset = SvgAsset::load(self.asset_path(spec.variant, spec.brackets))?;
        let size = scale_to_width(self.measure(&asset), spec.logo_width());
        asset.rasterize(size.width, size.height)
    }

    /// Renders a complete canvas for `spec`.
    pub fn render(&mut self, spec: &RenderSpec) -> Result<RenderedLogo> {
        spec.validate()?;

        let mut logo = self.render_logo(spec)?;
        if let Some(color) = spec.mono {
            logo = raster::mono_overlay(&DynamicImage::ImageRgba8(logo), color);
        }

        let mut canvas = raster::canvas(spec.size, spec.background);
        raster::compose_centered(&mut canvas, &logo);

        debug!(
            variant = %spec.variant,
            size = spec.size,
            background = %spec.background,
            logo_width = logo.width(),
            logo_height = logo.height(),
            "rendered logo"
        );

        Ok(RenderedLogo::new(
            spec.size,
            spec.variant,
            spec.background,
            canvas,
        ))
    }
}

/// Height is `native.height * target_width / native.width`, rounded half up
/// in integer arithmetic and never below 1.
fn scale_to_width(native: SizePx, target_width: u32) -> SizePx {
    let width = u64::from(native.width.max(1));
    let scaled = u64::from(native.height) * u64::from(target_width);
    let height = (2 * scaled + width) / (2 * width);
    SizePx::new(target_width, u32::try_from(height).unwrap_or(u32::MAX).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // 200x50 wordmark-like asset, opaque everywhere.
    const DARK_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="50"><rect width="200" height="50" fill="#454647"/></svg>"##;
    // 100x100 with a transparent ring around a 60x60 square.
    const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect x="20" y="20" width="60" height="60" fill="#d9643a"/></svg>"##;

    fn source_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dark.svg"), DARK_SVG).unwrap();
        fs::write(dir.path().join("dark-brackets.svg"), DARK_SVG).unwrap();
        fs::write(dir.path().join("favicon.svg"), FAVICON_SVG).unwrap();
        dir
    }

    #[test]
    fn spec_builder_defaults() {
        let spec = RenderSpec::new(100, LogoVariant::Dark, Color::TRANSPARENT);
        assert!(spec.brackets);
        assert!(spec.mono.is_none());
        assert_eq!(spec.width_multiplier, DEFAULT_WIDTH_MULTIPLIER);
        assert_eq!(spec.logo_width(), 80);
    }

    #[test]
    fn spec_validation() {
        let ok = RenderSpec::new(100, LogoVariant::Dark, Color::TRANSPARENT);
        assert!(ok.validate().is_ok());

        assert!(matches!(
            RenderSpec { size: 0, ..ok }.validate(),
            Err(Error::InvalidSpec(_))
        ));
        assert!(ok.with_width_multiplier(1.0).validate().is_err());
        assert!(ok.with_width_multiplier(0.0).validate().is_err());
        assert!(ok.with_width_multiplier(f64::NAN).validate().is_err());
        assert!(
            RenderSpec::new(1, LogoVariant::Dark, Color::TRANSPARENT)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn asset_paths_follow_naming() {
        let pipeline = LogoPipeline::new("source");
        assert_eq!(
            pipeline.asset_path(LogoVariant::Light, true),
            PathBuf::from("source/light-brackets.svg")
        );
        assert_eq!(
            pipeline.asset_path(LogoVariant::Favicon, true),
            PathBuf::from("source/favicon.svg")
        );
    }

    #[test]
    fn native_size_is_memoized() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());

        assert_eq!(pipeline.cached_sizes(), 0);
        assert_eq!(
            pipeline.native_size(LogoVariant::Dark, false).unwrap(),
            SizePx::new(200, 50)
        );
        assert_eq!(
            pipeline.logo_size(LogoVariant::Dark, false, 80).unwrap(),
            SizePx::new(80, 20)
        );
        assert_eq!(pipeline.cached_sizes(), 1);

        // Rendering the same variant reuses the measured entry.
        let spec = RenderSpec::new(100, LogoVariant::Dark, Color::TRANSPARENT).with_brackets(false);
        pipeline.render(&spec).unwrap();
        assert_eq!(pipeline.cached_sizes(), 1);
    }

    #[test]
    fn exact_half_heights_round_up() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());

        // 50 * 410 / 200 = 102.5
        assert_eq!(
            pipeline.logo_size(LogoVariant::Dark, false, 410).unwrap(),
            SizePx::new(410, 103)
        );
        // 50 * 2 / 200 = 0.5
        assert_eq!(scale_to_width(SizePx::new(200, 50), 2), SizePx::new(2, 1));
        // 80 * 717 / 300 = 191.2, 80 * 1434 / 300 = 382.4
        assert_eq!(scale_to_width(SizePx::new(300, 80), 717).height, 191);
        assert_eq!(scale_to_width(SizePx::new(300, 80), 1434).height, 382);
        // 25 * 3 / 2 = 37.5
        assert_eq!(scale_to_width(SizePx::new(2, 25), 3).height, 38);
    }

    #[test]
    fn sizes_are_keyed_by_source_path() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());

        let wordmark = pipeline.native_size(LogoVariant::Dark, true).unwrap();
        let favicon = pipeline.native_size(LogoVariant::Favicon, true).unwrap();
        assert_eq!(wordmark, SizePx::new(200, 50));
        assert_eq!(favicon, SizePx::new(100, 100));
        assert_eq!(
            pipeline.logo_size(LogoVariant::Favicon, false, 90).unwrap(),
            SizePx::new(90, 90)
        );
        assert_eq!(pipeline.cached_sizes(), 2);
    }

    #[test]
    fn native_size_of_missing_asset_fails() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());
        assert!(matches!(
            pipeline.native_size(LogoVariant::Light, true),
            Err(Error::ReadAsset { .. })
        ));
        assert_eq!(pipeline.cached_sizes(), 0);
    }

    #[test]
    fn render_produces_square_centered_canvas() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());
        let spec = RenderSpec::new(100, LogoVariant::Dark, Color::TRANSPARENT);

        let logo = pipeline.render(&spec).unwrap();
        assert_eq!(logo.image.dimensions(), (100, 100));

        // 80x20 logo -> left 10, top 40
        assert_eq!(logo.image.get_pixel(10, 40).0, [69, 70, 71, 255]);
        assert_eq!(logo.image.get_pixel(89, 59).0, [69, 70, 71, 255]);
        assert_eq!(logo.image.get_pixel(9, 40)[3], 0);
        assert_eq!(logo.image.get_pixel(90, 59)[3], 0);
        assert_eq!(logo.image.get_pixel(10, 39)[3], 0);
        assert_eq!(logo.image.get_pixel(10, 60)[3], 0);
    }

    #[test]
    fn render_on_colored_background() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());
        let spec = RenderSpec::new(50, LogoVariant::Favicon, Color::LIGHT)
            .with_brackets(false)
            .with_width_multiplier(0.9);

        let logo = pipeline.render(&spec).unwrap();
        assert_eq!(logo.image.get_pixel(0, 0).0, [235, 235, 235, 255]);
        assert_eq!(logo.image.get_pixel(25, 25).0, [0xd9, 0x64, 0x3a, 255]);
    }

    #[test]
    fn render_mono_flattens_color() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());
        let spec = RenderSpec::new(100, LogoVariant::Favicon, Color::TRANSPARENT)
            .with_mono(Some(Color::LIGHT))
            .with_width_multiplier(0.9);

        let logo = pipeline.render(&spec).unwrap();
        for pixel in logo.image.pixels().filter(|p| p[3] == 255) {
            assert_eq!(pixel.0, [235, 235, 235, 255]);
        }
        assert_eq!(logo.image.get_pixel(50, 50).0, [235, 235, 235, 255]);
        assert_eq!(logo.image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn render_missing_asset_fails() {
        let dir = source_dir();
        let mut pipeline = LogoPipeline::new(dir.path());
        let spec = RenderSpec::new(100, LogoVariant::Light, Color::TRANSPARENT);
        assert!(matches!(
            pipeline.render(&spec),
            Err(Error::ReadAsset { .. })
        ));
    }
}
