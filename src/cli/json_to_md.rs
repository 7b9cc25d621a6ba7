//! JSON to Markdown CLI command

use crate::models::{QakitConfig, RenderConfig};
use crate::render::{self, Conversion};
use crate::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Select;
use std::env;
use std::path::{Path, PathBuf};

/// Files listed in the interactive picker
const MAX_CHOICES: usize = 20;

#[derive(Args, Debug)]
pub struct JsonToMdArgs {
    /// JSON file or directory (omit to pick interactively)
    pub path: Option<PathBuf>,

    /// Output Markdown path (single file only)
    pub output: Option<PathBuf>,
}

pub fn run(args: JsonToMdArgs, config: QakitConfig) -> Result<()> {
    let render_config = config.json_to_md;

    match args.path {
        Some(path) if path.is_dir() => {
            if args.output.is_some() {
                println!(
                    "{}",
                    "⚠ Output path is ignored when converting a directory".yellow()
                );
            }
            convert_directory(&path, render_config)
        }
        Some(path) => {
            let written = render::convert_file(&path, args.output.as_deref(), render_config)?;
            print_converted(&path, &written);
            Ok(())
        }
        None => run_interactive(render_config),
    }
}

fn convert_directory(dir: &Path, config: RenderConfig) -> Result<()> {
    println!("{}", format!("📂 Converting JSON files in {}", dir.display()).cyan());

    let conversions = render::convert_dir(dir, config)?;
    if conversions.is_empty() {
        println!("{}", "⚠ No JSON files found".yellow());
        return Ok(());
    }

    report(&conversions);
    Ok(())
}

fn report(conversions: &[Conversion]) {
    let mut failed = 0;
    for conversion in conversions {
        match &conversion.result {
            Ok(written) => print_converted(&conversion.source, written),
            Err(e) => {
                failed += 1;
                println!("{}", format!("❌ {}: {}", conversion.source.display(), e).red());
            }
        }
    }

    println!();
    let converted = conversions.len() - failed;
    let line = format!("Converted {} of {} files", converted, conversions.len());
    if failed == 0 {
        println!("{}", format!("✅ {}", line).green().bold());
    } else {
        println!("{}", format!("⚠ {}", line).yellow().bold());
    }
}

fn print_converted(source: &Path, written: &Path) {
    println!(
        "{} {} {} {}",
        "✓".green(),
        source.display(),
        "→".bright_black(),
        written.display()
    );
}

fn run_interactive(config: RenderConfig) -> Result<()> {
    let root = env::current_dir()?;
    let candidates = render::find_json_candidates(&root)?;

    if candidates.is_empty() {
        println!("{}", "⚠ No JSON files found in the current directory".yellow());
        return Ok(());
    }

    let shown = &candidates[..candidates.len().min(MAX_CHOICES)];
    let mut options: Vec<String> = shown
        .iter()
        .map(|path| {
            path.strip_prefix(&root)
                .unwrap_or(path.as_path())
                .display()
                .to_string()
        })
        .collect();
    options.push(format!("All files ({})", candidates.len()));

    println!("{}", "Which file should be converted?".cyan());
    let selection = Select::new()
        .items(&options)
        .default(0)
        .interact_opt()
        .map_err(|e| anyhow::anyhow!("Terminal not available: {}", e))?;

    match selection {
        Some(idx) if idx < shown.len() => {
            let path = &shown[idx];
            let written = render::convert_file(path, None, config)?;
            print_converted(path, &written);
        }
        Some(_) => {
            let conversions: Vec<Conversion> = candidates
                .iter()
                .map(|source| Conversion {
                    source: source.clone(),
                    result: render::convert_file(source, None, config),
                })
                .collect();
            report(&conversions);
        }
        None => println!("{}", "Cancelled".bright_black()),
    }

    Ok(())
}
