//! SVG rasterization and pixel compositing using resvg.
//!
//! This module holds the pixel-level building blocks of the pipeline:
//! loading a source asset, rasterizing it at an exact size, flattening it to
//! a single color, and pasting it onto a canvas.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::logo::SizePx;

// ============================================================================
// SvgAsset
// ============================================================================

/// System fonts, loaded on first parse and shared by every asset after that.
fn system_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Parser options whose font database holds the system fonts, so `<text>`
/// elements in source artwork are drawn rather than dropped.
fn svg_options() -> Options<'static> {
    let mut options = Options::default();
    options.fontdb = system_fonts();
    options
}

/// A parsed source SVG.
pub struct SvgAsset {
    path: PathBuf,
    tree: Tree,
}

impl SvgAsset {
    /// Reads and parses the SVG at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).map_err(|source| Error::ReadAsset {
            path: path.clone(),
            source,
        })?;
        Self::from_data(path, &data)
    }

    /// Parses SVG markup that is identified by `path` but not read from it.
    pub fn from_data(path: impl Into<PathBuf>, data: &[u8]) -> Result<Self> {
        let path = path.into();
        let tree = Tree::from_data(data, &svg_options()).map_err(|source| {
            Error::ParseSvg {
                path: path.clone(),
                source,
            }
        })?;
        Ok(Self { path, tree })
    }

    /// Path the asset was loaded from, or the label it was parsed under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel dimensions the asset rasterizes to at scale 1.
    pub fn native_size(&self) -> SizePx {
        let size = self.tree.size().to_int_size();
        SizePx::new(size.width(), size.height())
    }

    /// Rasterizes the asset stretched to exactly `width` x `height`.
    ///
    /// The vector data is drawn at the target size directly rather than
    /// resampled from another raster.
    pub fn rasterize(&self, width: u32, height: u32) -> Result<RgbaImage> {
        let mut pixmap = Pixmap::new(width, height).ok_or(Error::Raster { width, height })?;

        let svg_size = self.tree.size();
        let transform = Transform::from_scale(
            width as f32 / svg_size.width(),
            height as f32 / svg_size.height(),
        );
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        Ok(pixmap_to_rgba_image(&pixmap))
    }
}

/// Converts a premultiplied tiny_skia pixmap to a straight-alpha image.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

// ============================================================================
// Mono overlay
// ============================================================================

/// Flattens `logo` to a single `color`, keeping its alpha silhouette.
///
/// The result has the logo's dimensions, every pixel's RGB equal to `color`
/// and its alpha copied from the logo. A logo without an alpha channel is
/// treated as fully opaque.
pub fn mono_overlay(logo: &DynamicImage, color: Color) -> RgbaImage {
    let has_alpha = logo.color().has_alpha();
    let mut out = RgbaImage::from_pixel(logo.width(), logo.height(), color.to_rgba());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        pixel[3] = if has_alpha {
            logo.get_pixel(x, y)[3]
        } else {
            u8::MAX
        };
    }
    out
}

// ============================================================================
// Compositing
// ============================================================================

/// Creates a `size` x `size` canvas filled with `background`.
pub fn canvas(size: u32, background: Color) -> RgbaImage {
    RgbaImage::from_pixel(size, size, background.to_rgba())
}

/// Top-left offset that centers `inner` within `outer`.
///
/// Rounds toward negative infinity, so odd leftovers go to the right and
/// bottom edges.
pub fn center_offset(outer: SizePx, inner: SizePx) -> (i64, i64) {
    let left = (outer.width as i64 - inner.width as i64).div_euclid(2);
    let top = (outer.height as i64 - inner.height as i64).div_euclid(2);
    (left, top)
}

/// Pastes `src` onto `dest` at (`x`, `y`) using `src`'s alpha as the mask.
///
/// Every channel, alpha included, is interpolated between destination and
/// source by the mask value. Where the mask is zero the destination is left
/// untouched; where it is 255 the source replaces it. Pixels falling outside
/// `dest` are clipped.
pub fn paste_masked(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let dest_width = dest.width() as i64;
    let dest_height = dest.height() as i64;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i64;
        let dy = y + sy as i64;
        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let mask = src_pixel[3];
        if mask == 0 {
            continue;
        }

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        for c in 0..4 {
            dst_pixel[c] = blend_channel(dst_pixel[c], src_pixel[c], mask);
        }
    }
}

/// Linear interpolation from `dst` to `src` by `mask / 255`, rounded.
fn blend_channel(dst: u8, src: u8, mask: u8) -> u8 {
    let m = mask as u32;
    ((src as u32 * m + dst as u32 * (255 - m) + 127) / 255) as u8
}

/// Centers `logo` on `canvas` and pastes it masked by its own alpha.
pub fn compose_centered(canvas: &mut RgbaImage, logo: &RgbaImage) {
    let (left, top) = center_offset(
        SizePx::new(canvas.width(), canvas.height()),
        SizePx::new(logo.width(), logo.height()),
    );
    paste_masked(canvas, logo, left, top);
}

// ============================================================================
// Tests
// ============================================================================
