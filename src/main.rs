use clap::{Parser, Subcommand};
use siteprep::{bench, convert, output, redirect};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "siteprep")]
#[command(about = "Build-support utilities for a static blog")]
#[command(long_about = "\
Build-support utilities for a static blog

Three independent commands run around the static site build:

  redirect   Write an index.html stub that meta-refreshes to an article
  convert    Find every jpg/jpeg/png under the resources directory and
             republish it as an RGB JPEG, capped at a maximum width
  bench      Build a throwaway fixture tree and time directory-traversal
             strategies against it (developer curiosity, not shipped)

Defaults reproduce the blog pipeline's layout: sources in ../resources,
converted output in ../converted, 1280px cap, JPEG quality 80.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write an index.html that redirects to the given path
    Redirect {
        /// Path the generated page redirects to
        target: String,
        /// Output file path, including the final index.html
        index: PathBuf,
    },
    /// Convert blog images: normalize to RGB, cap width, re-encode as JPEG
    Convert(ConvertArgs),
    /// Time directory-traversal strategies against a synthetic tree
    Bench(BenchArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Directory to search for images
    #[arg(long, default_value = "../resources")]
    input: PathBuf,

    /// Directory the converted JPEGs are written to
    #[arg(long, default_value = "../converted")]
    output: PathBuf,

    /// Images wider than this are contain-resized to fit
    #[arg(long, default_value_t = 1280)]
    max_width: u32,

    /// JPEG encoding quality (1-100)
    #[arg(long, default_value_t = 80)]
    quality: u32,
}

#[derive(clap::Args)]
struct BenchArgs {
    /// Extensions the strategies filter for (comma-separated, equal length)
    #[arg(long = "ext", value_delimiter = ',', default_value = "csv,tsv,txt")]
    extensions: Vec<String>,

    /// Subdirectories per level of the fixture tree
    #[arg(long, default_value_t = 3)]
    fanout: usize,

    /// Nesting depth of the fixture tree
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Timed runs per strategy
    #[arg(long, default_value_t = 100)]
    iterations: u32,

    /// Where the JSON timing report is written
    #[arg(long, default_value = "bench-report.json")]
    report: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Redirect { target, index } => {
            redirect::write_redirect(&target, &index)?;
            println!("-> {} -> {}", index.display(), target);
        }
        Command::Convert(args) => {
            let config = convert::ConvertConfig {
                input_dir: args.input,
                output_dir: args.output,
                max_width: args.max_width,
                quality: convert::Quality::new(args.quality),
            };
            let report = convert::convert_all(&config)?;
            output::print_convert_report(&report);
        }
        Command::Bench(args) => {
            let config = bench::BenchConfig {
                fixture: bench::FixtureSpec {
                    extensions: args.extensions,
                    fanout: args.fanout,
                    depth: args.depth,
                },
                iterations: args.iterations,
                report_path: args.report,
            };
            let report = bench::run(&config)?;
            output::print_bench_report(&report, &config.report_path);
        }
    }

    Ok(())
}
