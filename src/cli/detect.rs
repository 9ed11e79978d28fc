//! Detect command implementation

use anyhow::{Context, Result};
use clap::Args;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{OutputFormat, ProfileArg};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::detect::Detector;
use crate::domain::{Config, DetectionResult};
use crate::utils::{decode_text, format_with_commas, read_file_safe};

#[derive(Args)]
pub struct DetectArgs {
    /// Files or directories to inspect; reads stdin when omitted or `-`
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Filename hint for stdin input (only its extension is used)
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Never use filename extensions; always score the content
    #[arg(long)]
    pub no_extension_hint: bool,

    /// Signature table and confidence policy
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show per-language scores and the patterns that matched
    #[arg(long)]
    pub explain: bool,

    /// Path to config file (langsniff.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files larger than this (bytes)
    #[arg(long, value_name = "BYTES")]
    pub max_file_bytes: Option<u64>,

    /// Ignore .gitignore rules when walking directories
    #[arg(long)]
    pub no_gitignore: bool,

    /// Follow symbolic links when walking directories
    #[arg(long)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ScoreEntry {
    name: String,
    score: u32,
    matched: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct StdinReport {
    #[serde(flatten)]
    result: DetectionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<ScoreEntry>>,
}

#[derive(Debug, Clone, Serialize)]
struct FileReport {
    path: String,
    language: DetectionResult,
    #[serde(skip_serializing)]
    bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<ScoreEntry>>,
}

enum FileOutcome {
    Detected(FileReport),
    TooLarge(PathBuf),
    Unreadable(PathBuf, anyhow::Error),
}

pub fn run(args: DetectArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;

    let cli_overrides = CliOverrides {
        profile: args.profile.map(Into::into),
        max_file_bytes: args.max_file_bytes,
        respect_gitignore: if args.no_gitignore { Some(false) } else { None },
        follow_symlinks: if args.follow_symlinks { Some(true) } else { None },
        extension_hint: if args.no_extension_hint { Some(false) } else { None },
    };
    let config = merge_cli_with_config(file_config, cli_overrides);

    let detector = Detector::from_config(&config).context("Invalid signature configuration")?;
    tracing::debug!(
        profile = config.profile.as_str(),
        languages = detector.registry().len(),
        "detector ready"
    );

    let reads_stdin = args.paths.is_empty() || (args.paths.len() == 1 && args.paths[0] == Path::new("-"));
    if reads_stdin {
        return detect_stdin(&detector, &args);
    }

    if args.filename.is_some() {
        anyhow::bail!("--filename only applies to stdin input");
    }
    if args.paths.iter().any(|p| p == Path::new("-")) {
        anyhow::bail!("Cannot mix stdin (-) with file paths");
    }

    let files = collect_files(&args.paths, &config)?;
    tracing::debug!(files = files.len(), "collected files");

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| detect_file(&detector, path, config.max_file_bytes, args.explain))
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut skipped = 0usize;
    for outcome in outcomes {
        match outcome {
            FileOutcome::Detected(report) => reports.push(report),
            FileOutcome::TooLarge(path) => {
                skipped += 1;
                tracing::warn!(
                    path = %path.display(),
                    max_file_bytes = config.max_file_bytes,
                    "skipping file over size limit"
                );
            }
            FileOutcome::Unreadable(path, err) => {
                skipped += 1;
                tracing::warn!(path = %path.display(), "skipping unreadable file: {err:#}");
            }
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!("{}: {}", report.path, format_result(&report.language));
                if let Some(scores) = &report.scores {
                    print_scores(scores);
                }
            }
            if reports.len() + skipped > 1 {
                let total_bytes: u64 = reports.iter().map(|r| r.bytes).sum();
                println!();
                println!(
                    "Detected {} files ({} bytes), skipped {}",
                    reports.len(),
                    format_with_commas(total_bytes),
                    skipped
                );
            }
        }
    }

    Ok(())
}

fn detect_stdin(detector: &Detector, args: &DetectArgs) -> Result<()> {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes).context("Failed to read stdin")?;

    let text = decode_text(&bytes);
    let result = detector.detect(&text, args.filename.as_deref());
    let scores = args.explain.then(|| explain(detector, &text));

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&StdinReport { result, scores })?);
        }
        OutputFormat::Text => {
            println!("{}", format_result(&result));
            if let Some(scores) = &scores {
                print_scores(scores);
            }
        }
    }
    Ok(())
}

fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("Path not found: {}", path.display());
        }

        let walker = WalkBuilder::new(path)
            .git_ignore(config.respect_gitignore)
            .git_global(config.respect_gitignore)
            .git_exclude(config.respect_gitignore)
            .follow_links(config.follow_symlinks)
            .build();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("walk error under {}: {err}", path.display());
                    continue;
                }
            };
            if entry.file_type().is_some_and(|ft| ft.is_file()) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn detect_file(detector: &Detector, path: &Path, max_file_bytes: u64, explain_scores: bool) -> FileOutcome {
    let text = match read_file_safe(path, max_file_bytes) {
        Ok(Some(text)) => text,
        Ok(None) => return FileOutcome::TooLarge(path.to_path_buf()),
        Err(err) => return FileOutcome::Unreadable(path.to_path_buf(), err),
    };

    let filename = path.file_name().and_then(|n| n.to_str());
    let language = detector.detect(&text, filename);
    let scores = explain_scores.then(|| explain(detector, &text));

    FileOutcome::Detected(FileReport {
        path: path.display().to_string(),
        language,
        bytes: text.len() as u64,
        scores,
    })
}

fn explain(detector: &Detector, text: &str) -> Vec<ScoreEntry> {
    detector
        .score(text)
        .entries()
        .iter()
        .filter(|entry| entry.score > 0)
        .map(|entry| ScoreEntry {
            name: entry.language.to_string(),
            score: entry.score,
            matched: entry.matched.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}

fn format_result(result: &DetectionResult) -> String {
    format!("{} ({:.2})", result.language, result.confidence)
}

fn print_scores(scores: &[ScoreEntry]) {
    if scores.is_empty() {
        println!("  no rules matched");
        return;
    }
    for entry in scores {
        println!("  {:<12} {:>3}  {}", entry.name, entry.score, entry.matched.join("  "));
    }
}
