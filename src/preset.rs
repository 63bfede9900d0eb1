//! Named render configurations.
//!
//! | Preset | Background(s) | Variant(s) | Brackets | Mono | Width | Invert label |
//! |---|---|---|---|---|---|---|
//! | standard | transparent | dark, light | yes | no | default | no |
//! | social | light, dark | dark, light | yes | no | default | yes |
//! | mono | transparent | dark, light | yes | dark, light | 0.9 | no |
//! | simple | light, dark | dark, light | no | no | 0.7 | yes |
//! | favicon | transparent | favicon | no | no | 0.9 | no |
//! | icon | light, dark | favicon | no | no | 0.9 | no |

use std::fmt;

use serde::Serialize;

use crate::color::Color;
use crate::logo::LogoVariant;
use crate::pipeline::RenderSpec;

/// One background/variant combination rendered at every target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetPass {
    /// Canvas fill.
    pub background: Color,
    /// Artwork drawn on the canvas.
    pub variant: LogoVariant,
    /// Use the bracketed artwork.
    pub brackets: bool,
    /// Flatten the artwork to this color.
    pub mono: Option<Color>,
    /// `None` uses the generator's default multiplier.
    pub width_multiplier: Option<f64>,
}

impl PresetPass {
    const fn new(background: Color, variant: LogoVariant) -> Self {
        Self {
            background,
            variant,
            brackets: true,
            mono: None,
            width_multiplier: None,
        }
    }

    const fn without_brackets(mut self) -> Self {
        self.brackets = false;
        self
    }

    const fn mono(mut self, color: Color) -> Self {
        self.mono = Some(color);
        self
    }

    const fn width(mut self, multiplier: f64) -> Self {
        self.width_multiplier = Some(multiplier);
        self
    }

    /// Builds the spec for one target size.
    pub fn spec(&self, size: u32, default_multiplier: f64) -> RenderSpec {
        RenderSpec::new(size, self.variant, self.background)
            .with_brackets(self.brackets)
            .with_mono(self.mono)
            .with_width_multiplier(self.width_multiplier.unwrap_or(default_multiplier))
    }
}

const STANDARD: &[PresetPass] = &[
    PresetPass::new(Color::TRANSPARENT, LogoVariant::Dark),
    PresetPass::new(Color::TRANSPARENT, LogoVariant::Light),
];

const SOCIAL: &[PresetPass] = &[
    PresetPass::new(Color::LIGHT, LogoVariant::Dark),
    PresetPass::new(Color::DARK, LogoVariant::Light),
];

const MONO: &[PresetPass] = &[
    PresetPass::new(Color::TRANSPARENT, LogoVariant::Dark)
        .mono(Color::DARK)
        .width(0.9),
    PresetPass::new(Color::TRANSPARENT, LogoVariant::Light)
        .mono(Color::LIGHT)
        .width(0.9),
];

const SIMPLE: &[PresetPass] = &[
    PresetPass::new(Color::LIGHT, LogoVariant::Dark)
        .without_brackets()
        .width(0.7),
    PresetPass::new(Color::DARK, LogoVariant::Light)
        .without_brackets()
        .width(0.7),
];

const FAVICON: &[PresetPass] = &[PresetPass::new(Color::TRANSPARENT, LogoVariant::Favicon)
    .without_brackets()
    .width(0.9)];

const ICON: &[PresetPass] = &[
    PresetPass::new(Color::LIGHT, LogoVariant::Favicon)
        .without_brackets()
        .width(0.9),
    PresetPass::new(Color::DARK, LogoVariant::Favicon)
        .without_brackets()
        .width(0.9),
];

/// A named output folder of logo renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Preset {
    /// Transparent background with brackets.
    Standard,
    /// Dark/light background with brackets.
    Social,
    /// Transparent background with brackets, solid color logo.
    Mono,
    /// Dark/light background without brackets.
    Simple,
    /// Favicon on a transparent background.
    Favicon,
    /// Favicon on dark/light backgrounds.
    Icon,
}

impl Preset {
    /// Every preset, in the order a full run generates them.
    pub const ALL: [Preset; 6] = [
        Self::Standard,
        Self::Social,
        Self::Mono,
        Self::Simple,
        Self::Favicon,
        Self::Icon,
    ];

    /// Lowercase preset name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Social => "social",
            Self::Mono => "mono",
            Self::Simple => "simple",
            Self::Favicon => "favicon",
            Self::Icon => "icon",
        }
    }

    /// Output directory, relative to the output root.
    pub fn directory(&self) -> &'static str {
        self.name()
    }

    /// Background/variant passes, in render order.
    pub fn passes(&self) -> &'static [PresetPass] {
        match self {
            Self::Standard => STANDARD,
            Self::Social => SOCIAL,
            Self::Mono => MONO,
            Self::Simple => SIMPLE,
            Self::Favicon => FAVICON,
            Self::Icon => ICON,
        }
    }

    /// Whether saved file names swap dark and light.
    ///
    /// Set for presets whose artwork contrasts with a colored background, so
    /// the name describes the background rather than the artwork.
    pub fn inverts_label(&self) -> bool {
        matches!(self, Self::Social | Self::Simple)
    }

    /// All render specs for this preset, pass by pass, each across `sizes`.
    pub fn specs(&self, sizes: &[u32], default_multiplier: f64) -> Vec<RenderSpec> {
        self.passes()
            .iter()
            .flat_map(|pass| sizes.iter().map(move |&size| pass.spec(size, default_multiplier)))
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
