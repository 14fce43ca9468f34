//! Directory-traversal benchmark.
//!
//! A developer-side harness answering one question: for "find every file
//! with one of these extensions under a tree", how do pattern globbing and
//! manual walking compare? It builds a disposable fixture tree full of
//! files with fake extensions, times each strategy over a fixed iteration
//! count, and writes a JSON report.
//!
//! The fixture is rooted in a [`tempfile::TempDir`] so teardown is
//! guaranteed — runs are isolated and repeatable, never dependent on
//! leftover state from a previous invocation.
//!
//! Timings here are wall-clock micro-measurements on tiny trees. They are
//! good for comparing strategies against each other, not for absolute
//! numbers.

use glob::glob;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("extensions must all have the same length to build a glob pattern, got {0:?}")]
    MixedExtensionLengths(Vec<String>),
    #[error("at least one extension is required")]
    NoExtensions,
    #[error("fixture self-check failed: {0} received too few files")]
    FixtureCheck(PathBuf),
}

/// Shape of the synthetic fixture tree.
#[derive(Debug, Clone)]
pub struct FixtureSpec {
    /// Real extensions the strategies filter for. The fixture's fake
    /// extensions are permutations of this alphabet, so a known fraction
    /// of files genuinely match.
    pub extensions: Vec<String>,
    /// Subdirectories per directory.
    pub fanout: usize,
    /// Nesting depth.
    pub depth: usize,
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self {
            extensions: vec!["csv".into(), "tsv".into(), "txt".into()],
            fanout: 3,
            depth: 3,
        }
    }
}

/// A built fixture tree. Dropping it removes the tree.
pub struct Fixture {
    root: TempDir,
    directories: Vec<PathBuf>,
    file_count: usize,
}

impl Fixture {
    /// Build the tree described by `spec` and verify it.
    ///
    /// Every directory (root included) is populated with empty
    /// `file.<ext>` entries drawn from the fake-extension alphabet. The
    /// self-check confirms each directory received more entries than its
    /// subdirectory fanout — a thin guard against a silently empty
    /// fixture skewing every timing to zero.
    pub fn build(spec: &FixtureSpec) -> Result<Fixture, BenchError> {
        let root = TempDir::new()?;
        let mut directories = vec![root.path().to_path_buf()];
        make_dirs(root.path(), &mut directories, spec.fanout, spec.depth)?;

        let options = extension_options(&spec.extensions);
        let ratio = options.len() / directories.len();

        let mut file_count = 0;
        for (i, dir) in directories.iter().enumerate() {
            for option in options.iter().skip(i * ratio).take(ratio) {
                fs::write(dir.join(format!("file.{option}")), b"")?;
                file_count += 1;
            }
        }

        let fixture = Fixture {
            root,
            directories,
            file_count,
        };
        fixture.check(spec.fanout)?;
        Ok(fixture)
    }

    fn check(&self, fanout: usize) -> Result<(), BenchError> {
        for dir in &self.directories {
            if fs::read_dir(dir)?.count() <= fanout {
                return Err(BenchError::FixtureCheck(dir.clone()));
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }
}

fn make_dirs(
    parent: &Path,
    directories: &mut Vec<PathBuf>,
    fanout: usize,
    depth: usize,
) -> Result<(), BenchError> {
    if depth == 0 {
        return Ok(());
    }
    for i in 0..fanout {
        let child = parent.join(i.to_string());
        fs::create_dir(&child)?;
        directories.push(child.clone());
        make_dirs(&child, directories, fanout, depth - 1)?;
    }
    Ok(())
}

/// All distinct fake extensions: 4-slot permutations of the character pool
/// drawn from the real extensions, plus one empty slot (so 3-character
/// results — including the real extensions themselves — appear too).
pub fn extension_options(extensions: &[String]) -> Vec<String> {
    let mut pool: Vec<String> = extensions
        .iter()
        .flat_map(|e| e.chars().map(|c| c.to_string()))
        .collect();
    pool.push(String::new());

    let mut seen = BTreeSet::new();
    let mut picked = Vec::with_capacity(4);
    permute(&pool, &mut vec![false; pool.len()], &mut picked, 4, &mut seen);
    seen.into_iter().collect()
}

fn permute(
    pool: &[String],
    used: &mut Vec<bool>,
    picked: &mut Vec<usize>,
    remaining: usize,
    seen: &mut BTreeSet<String>,
) {
    if remaining == 0 {
        seen.insert(picked.iter().map(|&i| pool[i].as_str()).collect());
        return;
    }
    for i in 0..pool.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        picked.push(i);
        permute(pool, used, picked, remaining - 1, seen);
        picked.pop();
        used[i] = false;
    }
}

/// Glob pattern matching the extension set as position-wise character
/// classes: `csv/tsv/txt` → `**/*.[ct][sx][tv]`.
///
/// The classes match a superset of the real extensions (`cst` fits the
/// pattern above), so glob strategies still apply the exact set filter
/// afterwards — every strategy counts the same files.
pub fn pattern_for(extensions: &[String]) -> Result<String, BenchError> {
    let first = extensions.first().ok_or(BenchError::NoExtensions)?;
    if extensions.iter().any(|e| e.len() != first.len()) {
        return Err(BenchError::MixedExtensionLengths(extensions.to_vec()));
    }

    let mut pattern = String::from("**/*.");
    for i in 0..first.len() {
        let class: BTreeSet<char> = extensions.iter().filter_map(|e| e.chars().nth(i)).collect();
        pattern.push('[');
        pattern.extend(&class);
        pattern.push(']');
    }
    Ok(pattern)
}

/// A traversal/filter strategy under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Pattern glob, counted lazily without materializing.
    GlobLazy,
    /// Pattern glob, collected into a `Vec` first.
    GlobCollect,
    /// Manual walk with an extension-set filter, collected.
    WalkFilter,
    /// Manual walk, counted lazily.
    WalkLazy,
    /// Pattern glob consumed only until the first file matching the first
    /// configured extension. Deliberately not comparable to the full
    /// traversals — it measures time-to-first-hit, not total cost.
    GlobFirstMatch,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::GlobLazy,
        Strategy::GlobCollect,
        Strategy::WalkFilter,
        Strategy::WalkLazy,
        Strategy::GlobFirstMatch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::GlobLazy => "glob-lazy",
            Strategy::GlobCollect => "glob-collect",
            Strategy::WalkFilter => "walk-filter",
            Strategy::WalkLazy => "walk-lazy",
            Strategy::GlobFirstMatch => "glob-first-match",
        }
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known == ext))
}

/// Run one strategy once, returning how many entries it saw.
fn run_strategy(
    strategy: Strategy,
    root: &Path,
    pattern: &str,
    extensions: &[String],
) -> Result<usize, BenchError> {
    let full_pattern = root.join(pattern).to_string_lossy().into_owned();

    let count = match strategy {
        Strategy::GlobLazy => glob(&full_pattern)?
            .filter_map(|e| e.ok())
            .filter(|p| matches_extension(p, extensions))
            .count(),
        Strategy::GlobCollect => {
            let files: Vec<PathBuf> = glob(&full_pattern)?
                .filter_map(|e| e.ok())
                .filter(|p| matches_extension(p, extensions))
                .collect();
            files.len()
        }
        Strategy::WalkFilter => {
            let files: Vec<PathBuf> = WalkDir::new(root)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && matches_extension(e.path(), extensions))
                .map(|e| e.into_path())
                .collect();
            files.len()
        }
        Strategy::WalkLazy => WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && matches_extension(e.path(), extensions))
            .count(),
        Strategy::GlobFirstMatch => {
            let target = &extensions[0];
            let mut consumed = 0;
            for path in glob(&full_pattern)?.filter_map(|e| e.ok()) {
                consumed += 1;
                if path.extension().and_then(|e| e.to_str()) == Some(target) {
                    break;
                }
            }
            consumed
        }
    };
    Ok(count)
}

/// Timing summary for one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub iterations: u32,
    /// Entry count from the final run (match count, or entries consumed
    /// for the first-match strategy).
    pub matched: usize,
    pub total_micros: u64,
    pub min_micros: u64,
    pub mean_micros: u64,
}

/// Full benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub fixture: FixtureSpec,
    pub iterations: u32,
    pub report_path: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            fixture: FixtureSpec::default(),
            iterations: 100,
            report_path: PathBuf::from("bench-report.json"),
        }
    }
}

/// The written report.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub directories: usize,
    pub files: usize,
    pub iterations: u32,
    pub timings: Vec<StrategyTiming>,
}

/// Build the fixture, time every strategy, write the JSON report.
pub fn run(config: &BenchConfig) -> Result<BenchReport, BenchError> {
    let pattern = pattern_for(&config.fixture.extensions)?;
    let fixture = Fixture::build(&config.fixture)?;

    let mut timings = Vec::new();
    for strategy in Strategy::ALL {
        timings.push(time_strategy(
            strategy,
            &fixture,
            &pattern,
            &config.fixture.extensions,
            config.iterations,
        )?);
    }

    let report = BenchReport {
        directories: fixture.directory_count(),
        files: fixture.file_count(),
        iterations: config.iterations,
        timings,
    };
    write_report(&report, &config.report_path)?;
    Ok(report)
}

fn time_strategy(
    strategy: Strategy,
    fixture: &Fixture,
    pattern: &str,
    extensions: &[String],
    iterations: u32,
) -> Result<StrategyTiming, BenchError> {
    let mut total = Duration::ZERO;
    let mut min: Option<Duration> = None;
    let mut matched = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        matched = run_strategy(strategy, fixture.root(), pattern, extensions)?;
        let elapsed = start.elapsed();
        total += elapsed;
        min = Some(min.map_or(elapsed, |m| m.min(elapsed)));
    }

    Ok(StrategyTiming {
        strategy,
        iterations,
        matched,
        total_micros: total.as_micros() as u64,
        min_micros: min.unwrap_or_default().as_micros() as u64,
        mean_micros: (total / iterations.max(1)).as_micros() as u64,
    })
}

fn write_report(report: &BenchReport, path: &Path) -> Result<(), BenchError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
