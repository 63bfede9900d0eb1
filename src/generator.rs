//! Batch generation of preset folders.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::logo::{RenderedLogo, ensure_dir};
use crate::pipeline::LogoPipeline;
use crate::preset::Preset;
use crate::readme::{self, PreviewEntry, ReadmeTemplate};

/// A file written as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    /// Full path of the written PNG.
    pub path: PathBuf,
    pub filename: String,
    /// Canvas width and height in pixels.
    pub size: u32,
    /// Published as the dark-mode variant.
    pub dark: bool,
}

/// Everything one preset run wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub preset: Preset,
    /// Folder the batch was written to.
    pub directory: PathBuf,
    /// PNGs in render order.
    pub files: Vec<SavedFile>,
    /// Path of the generated README.
    pub readme: PathBuf,
}

impl BatchReport {
    /// Human-readable summary, e.g. `4 files saved to favicon`.
    pub fn summary(&self) -> String {
        let count = self.files.len();
        format!(
            "{} file{} saved to {}",
            readme::group_thousands(count as u32),
            if count == 1 { "" } else { "s" },
            self.preset.directory()
        )
    }
}

/// Renders presets and writes each as a folder of PNGs plus a README.
///
/// # Example
///
/// ```no_run
/// use logo_renderer::{GeneratorConfig, LogoGenerator};
///
/// let mut generator = LogoGenerator::new(GeneratorConfig::default().with_root("logo"));
/// let report = generator.generate_favicon()?;
/// assert_eq!(report.files.len(), 4);
/// # Ok::<(), logo_renderer::Error>(())
/// ```
pub struct LogoGenerator {
    config: GeneratorConfig,
    pipeline: LogoPipeline,
}

impl LogoGenerator {
    /// Creates a generator whose pipeline reads from the config's source directory.
    pub fn new(config: GeneratorConfig) -> Self {
        let pipeline = LogoPipeline::new(&config.source_dir);
        Self { config, pipeline }
    }

    /// Settings the generator was created with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The pipeline and its native-size memo.
    pub fn pipeline(&self) -> &LogoPipeline {
        &self.pipeline
    }

    /// Renders every spec of `preset` without touching the filesystem
    /// beyond reading source assets.
    pub fn render(&mut self, preset: Preset) -> Result<Vec<RenderedLogo>> {
        self.config.validate()?;
        let specs = preset.specs(&self.config.sizes, self.config.logo_width_multiplier);
        debug!(%preset, count = specs.len(), "rendering preset");

        specs
            .iter()
            .map(|spec| {
                self.pipeline
                    .render(spec)
                    .map(|logo| logo.with_inverted_label(preset.inverts_label()))
            })
            .collect()
    }

    /// Saves `logos` into the preset's directory and writes its README.
    pub fn save_all(&self, preset: Preset, logos: &[RenderedLogo]) -> Result<BatchReport> {
        let directory = self.config.output_dir.join(preset.directory());
        ensure_dir(&directory)?;

        let mut files = Vec::with_capacity(logos.len());
        let mut entries = Vec::with_capacity(logos.len());
        for logo in logos {
            let path = logo.save(&directory)?;
            debug!(path = %path.display(), "saved logo");
            entries.push(PreviewEntry::new(logo, preset.directory()));
            files.push(SavedFile {
                path,
                filename: logo.filename(),
                size: logo.size,
                dark: logo.is_dark_file(),
            });
        }

        let table = readme::preview_table(&entries, &self.config.link_base);
        let template = ReadmeTemplate::load(self.config.template_path())?;
        let readme = template.write(&directory, preset.directory(), &table)?;

        let report = BatchReport {
            preset,
            directory,
            files,
            readme,
        };
        info!("{}", report.summary());
        Ok(report)
    }

    /// Renders and saves one preset.
    pub fn generate(&mut self, preset: Preset) -> Result<BatchReport> {
        let logos = self.render(preset)?;
        self.save_all(preset, &logos)
    }

    /// Transparent background with brackets.
    pub fn generate_standard(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Standard)
    }

    /// Dark/light background with brackets.
    pub fn generate_social(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Social)
    }

    /// Transparent background with brackets, solid color logo.
    pub fn generate_mono(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Mono)
    }

    /// Dark/light background without brackets.
    pub fn generate_simple(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Simple)
    }

    /// Favicon on a transparent background.
    pub fn generate_favicon(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Favicon)
    }

    /// Favicon on light and dark backgrounds.
    pub fn generate_icon(&mut self) -> Result<BatchReport> {
        self.generate(Preset::Icon)
    }

    /// Generates every preset in order, stopping at the first failure.
    pub fn generate_all(&mut self) -> Result<Vec<BatchReport>> {
        Preset::ALL
            .into_iter()
            .map(|preset| self.generate(preset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(count: usize) -> BatchReport {
        BatchReport {
            preset: Preset::Icon,
            directory: PathBuf::from("icon"),
            files: (0..count)
                .map(|i| SavedFile {
                    path: PathBuf::from(format!("icon/x-{i}.png")),
                    filename: format!("x-{i}.png"),
                    size: 100,
                    dark: false,
                })
                .collect(),
            readme: PathBuf::from("icon/README.md"),
        }
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(report(1).summary(), "1 file saved to icon");
        assert_eq!(report(8).summary(), "8 files saved to icon");
        assert_eq!(report(0).summary(), "0 files saved to icon");
    }

    #[test]
    fn invalid_config_fails_before_rendering() {
        let mut generator = LogoGenerator::new(GeneratorConfig::new().with_sizes(&[]));
        assert!(generator.render(Preset::Standard).is_err());
        assert_eq!(generator.pipeline().cached_sizes(), 0);
    }
}
