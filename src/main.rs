// src/main.rs
use anyhow::Result;
use clap::Parser;
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process;
use walkdir::WalkDir;

use wavecheck::cli::{print_json, print_quiet, print_report, print_summary, Args};
use wavecheck::core::{analyze_file, AnalysisResult};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let files = collect_audio_files(&args.input);
    if files.is_empty() {
        eprintln!("{}", "No audio files found!".red());
        process::exit(1);
    }

    let config = args.analysis_config();
    let plot_dir = args.plot.then(|| args.output.clone());

    let batch = files.len() > 1;
    if batch && !args.quiet && !args.json {
        println!("Found {} audio file(s)\n", files.len());
    }

    let outcomes = run_batch(&files, &args, &config, plot_dir.as_deref(), batch);

    let mut results: Vec<AnalysisResult> = Vec::new();
    let mut errors: Vec<(String, String)> = Vec::new();

    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                if args.json {
                    print_json(&result);
                } else if args.quiet {
                    print_quiet(&result);
                } else {
                    print_report(&result, args.verbose);
                }
                results.push(result);
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Error analyzing {}: {:#}", path.display(), e).red()
                );
                errors.push((path.display().to_string(), format!("{:#}", e)));
            }
        }
    }

    if batch && !args.json && results.len() + errors.len() > 1 {
        print_summary(&results, &errors);
    }

    if !errors.is_empty() {
        process::exit(1);
    }
    Ok(())
}

type Outcome = (PathBuf, Result<AnalysisResult>);

/// Analyze every file. Batch runs are per-file independent, so they go
/// through rayon; results come back in input order.
fn run_batch(
    files: &[PathBuf],
    args: &Args,
    config: &wavecheck::core::AnalysisConfig,
    plot_dir: Option<&Path>,
    batch: bool,
) -> Vec<Outcome> {
    if !batch {
        let path = &files[0];
        return vec![(path.clone(), analyze_file(path, config, plot_dir))];
    }

    let style = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(files.len() as u64).with_style(style);

    files
        .par_iter()
        .progress_with(bar)
        .map(|path| (path.clone(), analyze_file(path, config, plot_dir)))
        .collect()
}

fn collect_audio_files(path: &Path) -> Vec<PathBuf> {
    let audio_extensions = ["wav", "flac", "mp3", "ogg", "m4a", "aac"];
    let is_audio = |p: &Path| {
        p.extension()
            .and_then(|e| e.to_str())
            .map(|e| audio_extensions.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false)
    };

    let mut files = Vec::new();
    if path.is_file() {
        // Explicit single file: analyze it whatever the extension
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().is_file() && is_audio(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
    }

    files
}
