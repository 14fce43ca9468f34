//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::bench::BenchReport;
use crate::convert::ConvertReport;
use std::path::Path;

/// Format the conversion report: one line per image, then a summary.
///
/// ```text
/// converted/2024/hike.jpeg (1280x720, resized)
/// converted/cover.jpeg (640x480)
/// Converted 2 images (1 resized)
/// ```
pub fn format_convert_report(report: &ConvertReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.images.len() + 1);
    for image in &report.images {
        let note = if image.resized { ", resized" } else { "" };
        lines.push(format!(
            "{} ({}x{}{})",
            image.output.display(),
            image.width,
            image.height,
            note
        ));
    }
    let resized = report.images.iter().filter(|i| i.resized).count();
    lines.push(format!(
        "Converted {} images ({} resized)",
        report.images.len(),
        resized
    ));
    lines
}

pub fn print_convert_report(report: &ConvertReport) {
    for line in format_convert_report(report) {
        println!("{line}");
    }
}

/// Format the benchmark report as an aligned per-strategy table.
///
/// ```text
/// Fixture: 40 directories, 1052 files, 100 iterations
/// glob-lazy          min    132µs   mean    151µs   320 matched
/// ...
/// Report: bench-report.json
/// ```
pub fn format_bench_report(report: &BenchReport, report_path: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Fixture: {} directories, {} files, {} iterations",
        report.directories, report.files, report.iterations
    )];
    for timing in &report.timings {
        lines.push(format!(
            "{:<18} min {:>6}µs   mean {:>6}µs   {} matched",
            timing.strategy.name(),
            timing.min_micros,
            timing.mean_micros,
            timing.matched
        ));
    }
    lines.push(format!("Report: {}", report_path.display()));
    lines
}

pub fn print_bench_report(report: &BenchReport, report_path: &Path) {
    for line in format_bench_report(report, report_path) {
        println!("{line}");
    }
}
