//! Batch image conversion.
//!
//! Walks the discovered images under an input directory and normalizes each
//! for publishing:
//!
//! 1. decode (JPEG or PNG, via the `image` crate's pure Rust decoders)
//! 2. convert to 8-bit RGB if needed — palette entries are expanded, alpha
//!    is dropped
//! 3. contain-resize when the image is wider than the configured maximum,
//!    preserving aspect ratio and never upscaling (Lanczos3)
//! 4. re-encode as JPEG at the configured quality into an output directory
//!    that mirrors the input's relative structure
//!
//! The pass is a pure batch transform: outputs are overwritten on re-run,
//! there is no skip-if-unchanged bookkeeping. The first failing image
//! aborts the batch with its error intact.

use crate::discover::{self, DiscoverError, DiscoverOptions};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// JPEG encoding quality (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Configuration for a conversion pass.
///
/// The defaults reproduce the blog build's layout: sources in
/// `../resources`, output next to them in `../converted`, nothing wider
/// than 1280px.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("../resources"),
            output_dir: PathBuf::from("../converted"),
            max_width: 1280,
            quality: Quality::default(),
        }
    }
}

/// One converted image, as recorded in the report.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    /// Source path relative to the input directory.
    pub source: PathBuf,
    /// Output path relative to the output directory's parent
    /// (e.g. `converted/posts/dawn.jpeg`).
    pub output: PathBuf,
    /// Output dimensions after any resize.
    pub width: u32,
    pub height: u32,
    /// Whether the image was scaled down.
    pub resized: bool,
}

/// Result of a conversion pass.
#[derive(Debug)]
pub struct ConvertReport {
    pub images: Vec<ConvertedImage>,
}

/// Convert every discovered image under `config.input_dir`.
///
/// Images are processed in sorted order so output (and any failure) is
/// deterministic across runs.
pub fn convert_all(config: &ConvertConfig) -> Result<ConvertReport, ConvertError> {
    let discovery = discover::discover(&config.input_dir, &DiscoverOptions::default())?;
    let input_root = discovery.root().to_path_buf();

    fs::create_dir_all(&config.output_dir)?;

    let mut images = Vec::new();
    for source in discovery {
        let rel = source.strip_prefix(&input_root).unwrap();
        images.push(convert_one(&source, rel, config)?);
    }

    Ok(ConvertReport { images })
}

fn convert_one(
    source: &Path,
    rel: &Path,
    config: &ConvertConfig,
) -> Result<ConvertedImage, ConvertError> {
    let img = ImageReader::open(source)?
        .decode()
        .map_err(|e| ConvertError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

    // Palette and alpha formats become plain RGB; already-RGB images pass
    // through without a pixel copy.
    let img = if matches!(img, DynamicImage::ImageRgb8(_)) {
        img
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    };

    let (img, resized) = match contain_dimensions(img.dimensions(), config.max_width) {
        Some((w, h)) => (img.resize_exact(w, h, FilterType::Lanczos3), true),
        None => (img, false),
    };

    let output = converted_path(rel, &config.output_dir);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(&output)?;
    let writer = io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, config.quality.value() as u8);
    img.write_with_encoder(encoder)
        .map_err(|e| ConvertError::Encode {
            path: output.clone(),
            source: e,
        })?;

    Ok(ConvertedImage {
        source: rel.to_path_buf(),
        output: reported_path(rel, &config.output_dir),
        width: img.width(),
        height: img.height(),
        resized,
    })
}

/// Dimensions after a contain-resize into a `max_width` square box, or
/// `None` when the image is narrow enough to pass through.
///
/// The trigger is width alone — a tall-but-narrow image is left untouched —
/// but once triggered the scale fits *both* dimensions within the box.
pub fn contain_dimensions((width, height): (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    if width <= max_width {
        return None;
    }
    let max = max_width as f64;
    let scale = (max / width as f64).min(max / height as f64);
    let w = (width as f64 * scale).round().max(1.0) as u32;
    let h = (height as f64 * scale).round().max(1.0) as u32;
    Some((w, h))
}

/// Output location for a source image: same relative path under
/// `output_dir`, with the extension replaced by `.jpeg`.
pub fn converted_path(rel: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(rel.with_extension("jpeg"))
}

/// Path shown in the report: output directory name plus relative path,
/// matching how the build tree looks from the project root.
fn reported_path(rel: &Path, output_dir: &Path) -> PathBuf {
    match output_dir.file_name() {
        Some(name) => Path::new(name).join(rel.with_extension("jpeg")),
        None => rel.with_extension("jpeg"),
    }
}
