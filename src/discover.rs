//! Image file discovery.
//!
//! The single source of truth for "which files in this tree are blog
//! images". Both the conversion driver and ad-hoc scripts go through
//! [`discover`], so the extension set and ordering rules live in exactly
//! one place.
//!
//! Discovery is lazy: [`Discovery`] is an iterator, and in unsorted mode
//! nothing is read from disk until the caller pulls the next entry. Sorted
//! mode has to materialize the listing up front (there is no way to sort a
//! stream you haven't seen), so it collects once at construction and then
//! drains a vector. Restarting means calling [`discover`] again.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
}

/// Extensions recognized as blog images, matched case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Options controlling a discovery pass.
#[derive(Debug, Clone, Copy)]
pub struct DiscoverOptions {
    /// Yield paths in non-decreasing lexicographic order.
    pub sort: bool,
    /// Search subdirectories; when false only immediate children are seen.
    pub recursive: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            sort: true,
            recursive: true,
        }
    }
}

/// Iterator over discovered image paths.
///
/// Yields absolute paths under the resolved root. Unreadable entries are
/// skipped rather than surfaced — a vanishing file mid-walk is not an error
/// worth aborting a build over.
pub struct Discovery {
    root: PathBuf,
    inner: Inner,
}

enum Inner {
    Walk(walkdir::IntoIter),
    Sorted(std::vec::IntoIter<PathBuf>),
}

impl Discovery {
    /// The canonicalized directory this discovery pass walks.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for Discovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        match &mut self.inner {
            Inner::Sorted(paths) => paths.next(),
            Inner::Walk(walker) => loop {
                let entry = match walker.next()? {
                    Ok(entry) => entry,
                    Err(_) => continue,
                };
                if entry.file_type().is_file() && has_image_extension(entry.path()) {
                    return Some(entry.into_path());
                }
            },
        }
    }
}

/// Enumerate image files under `directory`.
///
/// Fails before yielding anything if `directory` does not resolve to an
/// existing directory. A path to a regular file and a nonexistent path are
/// both [`DiscoverError::NotADirectory`] — the distinction doesn't matter
/// to callers, neither can be walked.
pub fn discover(directory: &Path, options: &DiscoverOptions) -> Result<Discovery, DiscoverError> {
    let root = directory
        .canonicalize()
        .map_err(|_| DiscoverError::NotADirectory(directory.to_path_buf()))?;
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(directory.to_path_buf()));
    }

    let mut walker = WalkDir::new(&root).min_depth(1);
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let inner = if options.sort {
        let mut paths: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && has_image_extension(e.path()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();
        Inner::Sorted(paths.into_iter())
    } else {
        Inner::Walk(walker.into_iter())
    };

    Ok(Discovery { root, inner })
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    /// Tree with three matching files at the root, two in a subdirectory,
    /// and assorted non-matching noise.
    fn setup_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in ["banner.jpg", "cover.PNG", "photo.jpeg"] {
            fs::write(tmp.path().join(name), b"fake image").unwrap();
        }
        for name in ["notes.txt", "draft.md", "photo.jpeg.bak"] {
            fs::write(tmp.path().join(name), b"not an image").unwrap();
        }
        let sub = tmp.path().join("posts");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("diagram.png"), b"fake image").unwrap();
        fs::write(sub.join("scan.JPG"), b"fake image").unwrap();
        fs::write(sub.join("index.html"), b"<html>").unwrap();
        tmp
    }

    fn names(discovery: Discovery) -> Vec<String> {
        discovery
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn yields_only_matching_extensions() {
        let tmp = setup_tree();
        let found = names(discover(tmp.path(), &DiscoverOptions::default()).unwrap());

        assert_eq!(found.len(), 5);
        assert!(!found.contains(&"notes.txt".to_string()));
        assert!(!found.contains(&"draft.md".to_string()));
        assert!(!found.contains(&"photo.jpeg.bak".to_string()));
        assert!(!found.contains(&"index.html".to_string()));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = setup_tree();
        let found = names(discover(tmp.path(), &DiscoverOptions::default()).unwrap());

        assert!(found.contains(&"cover.PNG".to_string()));
        assert!(found.contains(&"scan.JPG".to_string()));
    }

    #[test]
    fn sorted_output_is_lexicographic() {
        let tmp = setup_tree();
        let paths: Vec<PathBuf> = discover(tmp.path(), &DiscoverOptions::default())
            .unwrap()
            .collect();

        let mut expected = paths.clone();
        expected.sort();
        assert_eq!(paths, expected);
    }

    #[test]
    fn unsorted_yields_same_set() {
        let tmp = setup_tree();
        let options = DiscoverOptions {
            sort: false,
            ..DiscoverOptions::default()
        };
        let unsorted: BTreeSet<PathBuf> = discover(tmp.path(), &options).unwrap().collect();
        let sorted: BTreeSet<PathBuf> = discover(tmp.path(), &DiscoverOptions::default())
            .unwrap()
            .collect();

        assert_eq!(unsorted, sorted);
    }

    #[test]
    fn non_recursive_ignores_subdirectories() {
        let tmp = setup_tree();
        let options = DiscoverOptions {
            recursive: false,
            ..DiscoverOptions::default()
        };
        let found = names(discover(tmp.path(), &options).unwrap());

        assert_eq!(found, vec!["banner.jpg", "cover.PNG", "photo.jpeg"]);
    }

    #[test]
    fn nonexistent_path_is_error() {
        let result = discover(Path::new("/no/such/directory"), &DiscoverOptions::default());
        assert!(matches!(result, Err(DiscoverError::NotADirectory(_))));
    }

    #[test]
    fn regular_file_is_error() {
        let tmp = setup_tree();
        let file = tmp.path().join("banner.jpg");
        let result = discover(&file, &DiscoverOptions::default());
        assert!(matches!(result, Err(DiscoverError::NotADirectory(_))));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let found: Vec<PathBuf> = discover(tmp.path(), &DiscoverOptions::default())
            .unwrap()
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn root_is_canonicalized() {
        let tmp = setup_tree();
        let discovery = discover(tmp.path(), &DiscoverOptions::default()).unwrap();
        assert_eq!(discovery.root(), tmp.path().canonicalize().unwrap());
    }
}
