//! Serializable generator settings.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "sizes": [100, 512, 1024, 2048],
//!   "sourceDir": "source",
//!   "outputDir": ".",
//!   "template": "source/README.md",
//!   "linkBase": "https://github.com/cdnjs/brand/blob/master/logo/",
//!   "logoWidthMultiplier": 0.8
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::DEFAULT_WIDTH_MULTIPLIER;
use crate::readme::DEFAULT_LINK_BASE;

/// Target canvas sizes rendered by every preset.
pub const DEFAULT_SIZES: [u32; 4] = [100, 512, 1024, 2048];

/// Paths, sizes and link settings for a generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GeneratorConfig {
    /// Canvas sizes, in pixels, rendered for each preset pass.
    pub sizes: Vec<u32>,

    /// Directory holding `<variant>[-brackets].svg`.
    pub source_dir: PathBuf,

    /// Root under which each preset's directory is created.
    pub output_dir: PathBuf,

    /// README template. Defaults to `README.md` inside `source_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Prefix for image links in the preview table.
    pub link_base: String,

    /// Logo width as a fraction of canvas width, for presets without their own.
    pub logo_width_multiplier: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            source_dir: PathBuf::from("source"),
            output_dir: PathBuf::from("."),
            template: None,
            link_base: DEFAULT_LINK_BASE.to_string(),
            logo_width_multiplier: DEFAULT_WIDTH_MULTIPLIER,
        }
    }
}

impl GeneratorConfig {
    /// Same as [`GeneratorConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the target canvas sizes.
    pub fn with_sizes(mut self, sizes: &[u32]) -> Self {
        self.sizes = sizes.to_vec();
        self
    }

    /// Sets the directory holding the source SVGs.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Sets the root the preset folders are written under.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Uses a README template other than `<source_dir>/README.md`.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Sets the prefix for preview table links.
    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = base.into();
        self
    }

    /// Resolved template path.
    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| self.source_dir.join("README.md"))
    }

    /// Anchors relative paths at `root`. Absolute paths are left alone.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.source_dir = root.join(&self.source_dir);
        self.output_dir = root.join(&self.output_dir);
        self.template = self.template.map(|t| root.join(t));
        self
    }

    /// Rejects settings that would make every render fail.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidSpec("no sizes configured".into()));
        }
        if self.sizes.contains(&0) {
            return Err(Error::InvalidSpec("sizes must be positive".into()));
        }
        if !(self.logo_width_multiplier > 0.0 && self.logo_width_multiplier < 1.0) {
            return Err(Error::InvalidSpec(format!(
                "logo width multiplier {} is outside (0, 1)",
                self.logo_width_multiplier
            )));
        }
        Ok(())
    }

    /// Serializes as indented camelCase JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses camelCase JSON, filling in missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.sizes, vec![100, 512, 1024, 2048]);
        assert_eq!(config.template_path(), PathBuf::from("source/README.md"));
    }

    #[test]
    fn camel_case_fields() {
        let json = GeneratorConfig::new()
            .with_template("tpl.md")
            .to_json_pretty()
            .unwrap();
        assert!(json.contains("\"sourceDir\""));
        assert!(json.contains("\"logoWidthMultiplier\""));
        assert!(json.contains("\"template\": \"tpl.md\""));
    }

    #[test]
    fn partial_override() {
        let config =
            GeneratorConfig::from_json(r#"{"sizes": [16, 32], "linkBase": "./"}"#).unwrap();
        assert_eq!(config.sizes, vec![16, 32]);
        assert_eq!(config.link_base, "./");
        assert_eq!(config.source_dir, PathBuf::from("source"));
    }

    #[test]
    fn unknown_json_is_a_config_error() {
        assert!(matches!(
            GeneratorConfig::from_json(r#"{"sizes": "big"}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn root_anchors_relative_paths() {
        let config = GeneratorConfig::new()
            .with_template("custom.md")
            .with_output_dir("/abs/out")
            .with_root("/work/logo");
        assert_eq!(config.source_dir, PathBuf::from("/work/logo/source"));
        assert_eq!(config.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(config.template_path(), PathBuf::from("/work/logo/custom.md"));
    }

    #[test]
    fn validation() {
        assert!(GeneratorConfig::new().validate().is_ok());
        assert!(GeneratorConfig::new().with_sizes(&[]).validate().is_err());
        assert!(GeneratorConfig::new().with_sizes(&[0, 10]).validate().is_err());

        let mut config = GeneratorConfig::new();
        config.logo_width_multiplier = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            GeneratorConfig::load("/no/such/config.json"),
            Err(Error::ReadConfig { .. })
        ));
    }
}
