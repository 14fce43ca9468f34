//! # siteprep
//!
//! Build-support utilities for a static blog, bundled into one binary.
//! The blog itself is plain files on disk; these are the helpers the build
//! pipeline runs around it: generating redirect stubs, batch-converting
//! images for publishing, and (for developer curiosity) benchmarking
//! directory-traversal strategies.
//!
//! # Commands
//!
//! ```text
//! siteprep redirect <target> <index>   Write a meta-refresh index.html
//! siteprep convert                     Discover + convert blog images
//! siteprep bench                       Time traversal strategies
//! ```
//!
//! Each command is independent — no shared runtime, no persistent state.
//! What they do share is [`discover`]: a single parameterized image
//! discovery module, used by the conversion driver and available to
//! anything else that needs "the image files under this directory".
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discover`] | Lazy image-file discovery with sort/recursive options |
//! | [`convert`] | Batch conversion: RGB normalize, contain resize, JPEG encode |
//! | [`redirect`] | Meta-refresh redirect page rendering and writing |
//! | [`bench`] | Scoped synthetic fixture + traversal timing harness |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## One Discovery Module
//!
//! Image discovery used to exist twice with identical semantics. There was
//! no reason for the duplication, so it lives once in [`discover`] and both
//! the conversion driver and ad-hoc callers go through it.
//!
//! ## Maud Over String Templates
//!
//! The redirect page is rendered with [Maud](https://maud.lambda.xyz/):
//! malformed HTML is a compile error and target URLs are escaped on
//! interpolation, so a weird article path can't produce a broken page.
//!
//! ## Defaults Match the Pipeline, Flags Exist for Tests
//!
//! The conversion and benchmark commands historically hardcoded their
//! paths and thresholds (`../resources`, 1280px, quality 80, 100
//! iterations). Those are now flags with the same defaults: running the
//! binary from the build tree behaves exactly as before, while tests and
//! one-off runs can point it anywhere.
//!
//! ## Scoped Benchmark Fixtures
//!
//! The benchmark used to delete and recreate a fixed directory on every
//! run. Its fixture now lives in a `TempDir` owned by the run, so teardown
//! is guaranteed and concurrent runs can't trample each other.

pub mod bench;
pub mod convert;
pub mod discover;
pub mod output;
pub mod redirect;
