//! Logo variants, file labels, and finished renders.
//!
//! A [`RenderedLogo`] is produced once by the pipeline, saved once as a PNG,
//! and then dropped.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use serde::Serialize;

use crate::color::Color;
use crate::error::{Error, Result};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    /// Creates a size from its two dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

// ============================================================================
// LogoVariant
// ============================================================================

/// Which artwork family a render is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogoVariant {
    /// Dark artwork, meant for light surroundings.
    Dark,
    /// Light artwork, meant for dark surroundings.
    Light,
    /// The square mark used for favicons and app icons.
    Favicon,
}

impl LogoVariant {
    /// Lowercase name, used as the source file stem and fallback file label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Favicon => "favicon",
        }
    }

    /// Returns the source file name for this variant.
    ///
    /// Favicon artwork has no bracketed form, so `brackets` is ignored for it.
    pub fn source_file_name(&self, brackets: bool) -> String {
        match (self, brackets) {
            (Self::Favicon, _) | (_, false) => format!("{}.svg", self.name()),
            (_, true) => format!("{}-brackets.svg", self.name()),
        }
    }
}

impl fmt::Display for LogoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Dark/light mode a file is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    /// Meant for dark surroundings.
    Dark,
    /// Meant for light surroundings.
    Light,
}

impl Shade {
    /// The opposite shade.
    pub fn inverse(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// File name prefix for this shade.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Maps a palette background to its shade by value.
    ///
    /// Transparent and custom colors have no shade.
    pub fn of_background(background: Color) -> Option<Self> {
        if background == Color::DARK {
            Some(Self::Dark)
        } else if background == Color::LIGHT {
            Some(Self::Light)
        } else {
            None
        }
    }
}

/// The prefix used in an output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileLabel {
    /// The background or artwork decided the shade.
    Shade(Shade),
    /// No shade applies; the raw variant name is used.
    Variant(LogoVariant),
}

impl FileLabel {
    /// The prefix as written in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shade(shade) => shade.name(),
            Self::Variant(variant) => variant.name(),
        }
    }

    /// True for the `dark` label.
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Shade(Shade::Dark))
    }

    /// True for the `light` label.
    pub fn is_light(&self) -> bool {
        matches!(self, Self::Shade(Shade::Light))
    }
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a render for file naming.
///
/// Dark and light artwork carry their own shade. Favicon artwork takes the
/// shade of its background when that background is one of the palette
/// colors. `inverted` swaps dark and light; it never affects pixels.
pub fn classify(variant: LogoVariant, background: Color, inverted: bool) -> FileLabel {
    let shade = match variant {
        LogoVariant::Dark => Some(Shade::Dark),
        LogoVariant::Light => Some(Shade::Light),
        LogoVariant::Favicon => Shade::of_background(background),
    };

    match shade {
        Some(shade) if inverted => FileLabel::Shade(shade.inverse()),
        Some(shade) => FileLabel::Shade(shade),
        None => FileLabel::Variant(variant),
    }
}

// ============================================================================
// RenderedLogo
// ============================================================================

/// A finished square render and the metadata needed to name it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLogo {
    /// Width and height of the canvas.
    pub size: u32,
    /// Artwork the render was drawn from.
    pub variant: LogoVariant,
    /// Canvas fill behind the artwork.
    pub background: Color,
    /// Finished square canvas, straight alpha.
    pub image: RgbaImage,
    /// Swaps dark/light in the file name only.
    pub inverted_label: bool,
}

impl RenderedLogo {
    /// Wraps a finished canvas with an uninverted label.
    pub fn new(size: u32, variant: LogoVariant, background: Color, image: RgbaImage) -> Self {
        Self {
            size,
            variant,
            background,
            image,
            inverted_label: false,
        }
    }

    /// Sets whether the dark/light label is inverted.
    pub fn with_inverted_label(mut self, inverted: bool) -> Self {
        self.inverted_label = inverted;
        self
    }

    /// File label under [`classify`].
    pub fn label(&self) -> FileLabel {
        classify(self.variant, self.background, self.inverted_label)
    }

    /// Whether the file is published as the dark-mode variant.
    pub fn is_dark_file(&self) -> bool {
        self.label().is_dark()
    }

    /// Whether the file is published as the light-mode variant.
    pub fn is_light_file(&self) -> bool {
        self.label().is_light()
    }

    /// Returns `<label>-<size>.png`.
    pub fn filename(&self) -> String {
        format!("{}-{}.png", self.label(), self.size)
    }

    /// Encodes the image as a maximally compressed PNG.
    ///
    /// Identical pixels always encode to identical bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| Error::Encode {
                filename: self.filename(),
                source,
            })?;
        Ok(out)
    }

    /// Writes the PNG into `directory`, creating it if missing.
    ///
    /// Returns the path of the written file.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        ensure_dir(directory)?;

        let path = directory.join(self.filename());
        let bytes = self.to_png_bytes()?;
        fs::write(&path, bytes).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Creates `directory` and its parents if they do not exist.
pub(crate) fn ensure_dir(directory: &Path) -> Result<()> {
    if directory.as_os_str().is_empty() || directory.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(directory).map_err(|source| Error::CreateDir {
        path: directory.to_path_buf(),
        source,
    })
}
