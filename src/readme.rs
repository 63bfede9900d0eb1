//! Preview README generation for a saved batch.
//!
//! Each batch directory gets a README built from a template containing
//! `{directory}` and `{table}` placeholders. Literal braces are written as
//! `{{` and `}}`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logo::RenderedLogo;

/// Where preview links point when no other base is configured.
pub const DEFAULT_LINK_BASE: &str = "https://github.com/cdnjs/brand/blob/master/logo/";

const CHECK_MARK: char = '\u{2705}';
const CROSS_MARK: char = '\u{274C}';

/// One saved file as it appears in the preview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub filename: String,
    /// Path relative to the output root, with `/` separators.
    pub relative_path: String,
    /// Canvas size in pixels.
    pub size: u32,
    /// Shown as a check mark in the dark-mode column.
    pub dark: bool,
}

impl PreviewEntry {
    /// Describes `logo` as saved under `directory`.
    pub fn new(logo: &RenderedLogo, directory: &str) -> Self {
        let filename = logo.filename();
        Self {
            relative_path: format!("{}/{}", directory.trim_end_matches('/'), filename),
            filename,
            size: logo.size,
            dark: logo.is_dark_file(),
        }
    }

    /// Formats the markdown table row for this entry.
    pub fn row(&self, link_base: &str) -> String {
        let url = format!("{}{}", link_base, self.relative_path);
        format!(
            "| <img src='{url}?raw=true' width='64' alt=''/> | {}px | {} | [{}]({url}) |",
            group_thousands(self.size),
            if self.dark { CHECK_MARK } else { CROSS_MARK },
            self.filename,
        )
    }
}

/// Joins the rows for `entries` with newlines.
pub fn preview_table(entries: &[PreviewEntry], link_base: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.row(link_base))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats `n` with `,` between groups of three digits.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Template
// ============================================================================

/// A README template read from disk.
#[derive(Debug, Clone)]
pub struct ReadmeTemplate {
    source: String,
}

impl ReadmeTemplate {
    /// Wraps template text already in memory.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Reads the template at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| Error::ReadTemplate {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Substitutes `{directory}` and `{table}`.
    pub fn render(&self, directory: &str, table: &str) -> Result<String> {
        let values = HashMap::from([("directory", directory), ("table", table)]);
        fill(&self.source, &values)
    }

    /// Renders and writes `<directory>/README.md`, returning its path.
    pub fn write(&self, output_dir: &Path, directory: &str, table: &str) -> Result<PathBuf> {
        let contents = self.render(directory, table)?;
        let path = output_dir.join("README.md");
        fs::write(&path, contents).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Replaces `{name}` placeholders from `values`.
///
/// Unknown names, empty or unterminated placeholders, and a lone `}` are
/// errors.
fn fill(template: &str, values: &HashMap<&str, &str>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let start = pos + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '}')) => break i,
                        Some((_, '{')) | None => {
                            return Err(Error::Template(format!(
                                "unterminated placeholder at byte {pos}"
                            )));
                        }
                        Some(_) => {}
                    }
                };
                let name = &template[start..end];
                let value = values.get(name).ok_or_else(|| {
                    Error::Template(format!("unknown placeholder {{{name}}} at byte {pos}"))
                })?;
                out.push_str(value);
            }
            '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(Error::Template(format!(
                    "single '}}' encountered at byte {pos}"
                )));
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}
