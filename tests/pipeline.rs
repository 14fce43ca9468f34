//! End-to-end run over a realistic blog resources tree: discovery feeds
//! conversion, conversion mirrors the tree, and a redirect stub points at
//! the published article.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use siteprep::convert::{self, ConvertConfig, Quality};
use siteprep::discover::{self, DiscoverOptions};
use siteprep::redirect;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    let file = fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

fn write_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 50, 128])
    });
    img.save(path).unwrap();
}

/// resources/ tree with a wide banner, a nested photo, a transparent
/// diagram, and noise the pipeline must ignore.
fn setup_resources(root: &Path) {
    let resources = root.join("resources");
    let posts = resources.join("posts").join("2024");
    fs::create_dir_all(&posts).unwrap();

    write_jpeg(&resources.join("banner.jpg"), 2000, 500);
    write_jpeg(&posts.join("hike.jpeg"), 800, 600);
    write_rgba_png(&posts.join("diagram.png"), 300, 300);

    fs::write(resources.join("notes.txt"), b"not an image").unwrap();
    fs::write(posts.join("draft.md"), b"# wip").unwrap();
}

#[test]
fn convert_publishes_every_discovered_image() {
    let tmp = TempDir::new().unwrap();
    setup_resources(tmp.path());

    let config = ConvertConfig {
        input_dir: tmp.path().join("resources"),
        output_dir: tmp.path().join("converted"),
        max_width: 1280,
        quality: Quality::new(80),
    };
    let report = convert::convert_all(&config).unwrap();

    assert_eq!(report.images.len(), 3);
    assert!(tmp.path().join("converted/banner.jpeg").exists());
    assert!(tmp.path().join("converted/posts/2024/hike.jpeg").exists());
    assert!(tmp.path().join("converted/posts/2024/diagram.jpeg").exists());
    assert!(!tmp.path().join("converted/notes.jpeg").exists());

    // The 2000px banner was capped, aspect preserved
    let dims = image::image_dimensions(tmp.path().join("converted/banner.jpeg")).unwrap();
    assert_eq!(dims, (1280, 320));

    // The others fit and kept their dimensions
    let dims = image::image_dimensions(tmp.path().join("converted/posts/2024/hike.jpeg")).unwrap();
    assert_eq!(dims, (800, 600));
}

#[test]
fn discovery_matches_conversion_inputs() {
    let tmp = TempDir::new().unwrap();
    setup_resources(tmp.path());

    let found: Vec<_> = discover::discover(
        &tmp.path().join("resources"),
        &DiscoverOptions::default(),
    )
    .unwrap()
    .collect();

    let config = ConvertConfig {
        input_dir: tmp.path().join("resources"),
        output_dir: tmp.path().join("converted"),
        max_width: 1280,
        quality: Quality::default(),
    };
    let report = convert::convert_all(&config).unwrap();

    assert_eq!(found.len(), report.images.len());
}

#[test]
fn redirect_stub_points_at_published_article() {
    let tmp = TempDir::new().unwrap();
    let index = tmp.path().join("blog").join("index.html");

    redirect::write_redirect("posts/2024/hike.html", &index).unwrap();

    let content = fs::read_to_string(&index).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains(r#"content="0.2; url = posts/2024/hike.html""#));
}
