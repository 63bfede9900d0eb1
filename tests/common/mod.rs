#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use logo_renderer::{Color, GeneratorConfig};

pub const SIZES: [u32; 4] = [100, 512, 1024, 2048];

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/source")
}

/// Config reading the bundled fixtures and writing under `output`.
pub fn fixture_config(output: &Path) -> GeneratorConfig {
    GeneratorConfig::new()
        .with_source_dir(fixtures_dir())
        .with_output_dir(output)
        .with_link_base("https://example.org/logo/")
}

pub fn open_rgba(path: &Path) -> RgbaImage {
    let img = image::open(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    assert_eq!(img.color(), image::ColorType::Rgba8, "{}", path.display());
    img.into_rgba8()
}

pub fn file_names(dir: &Path, extension: &str) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

pub fn expected_names(labels: &[&str]) -> BTreeSet<String> {
    labels
        .iter()
        .flat_map(|label| SIZES.iter().map(move |size| format!("{label}-{size}.png")))
        .collect()
}

/// Inclusive bounds `(left, top, right, bottom)` of pixels that differ from `background`.
pub fn artwork_bounds(img: &RgbaImage, background: Color) -> Option<(u32, u32, u32, u32)> {
    let bg = background.to_rgba();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.enumerate_pixels() {
        if *pixel == bg {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }
    bounds
}

pub fn corners(img: &RgbaImage) -> [Color; 4] {
    let (w, h) = img.dimensions();
    [
        (*img.get_pixel(0, 0)).into(),
        (*img.get_pixel(w - 1, 0)).into(),
        (*img.get_pixel(0, h - 1)).into(),
        (*img.get_pixel(w - 1, h - 1)).into(),
    ]
}
