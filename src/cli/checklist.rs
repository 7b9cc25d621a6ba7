//! Checklist CLI command
//!
//! Reads a Markdown requirements document and writes the regression
//! checklist CSV next to it.

use crate::checklist::{self, ChecklistReport};
use crate::models::{ChecklistJsonOutput, QakitConfig};
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ChecklistArgs {
    /// Requirements document (Markdown)
    pub input: PathBuf,

    /// Output CSV path (default: ЧекЛист-<input stem>.csv next to the input)
    pub output: Option<PathBuf>,

    /// Project name shown in the summary (default: input file stem)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Section prefix to extract (overrides the config file)
    #[arg(short = 's', long)]
    pub start_section: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn project_name(args: &ChecklistArgs) -> String {
    args.project.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

pub fn run(args: ChecklistArgs, config: QakitConfig) -> Result<()> {
    let mut config = config.checklist;
    if let Some(start) = &args.start_section {
        config.start_section = start.clone();
    }

    let project = project_name(&args);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| checklist::default_output_path(&args.input));

    if !args.json {
        println!("{}", format!("📋 Building checklist: {}", project).cyan());
        println!(
            "{}",
            format!(
                "   Source: {} (sections {}.*)",
                args.input.display(),
                config.start_section
            )
            .bright_black()
        );
    }

    let report = checklist::generate(&config, &args.input, &output)?;

    if args.json {
        print_json(project, report)?;
    } else {
        print_summary(&report, &output);
    }

    Ok(())
}

fn print_json(project: String, report: ChecklistReport) -> Result<()> {
    let output = ChecklistJsonOutput {
        project,
        output: report.output.display().to_string(),
        summary: report.summary,
        items: report.items,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(report: &ChecklistReport, output: &Path) {
    let summary = &report.summary;
    println!();

    if summary.checks == 0 && summary.labels == 0 {
        println!(
            "{}",
            "⚠ No requirements found; the checklist contains only the header row".yellow()
        );
    } else {
        println!(
            "{}",
            format!(
                "✅ {} checks, {} groups in {} sections",
                summary.checks, summary.labels, summary.sections
            )
            .green()
            .bold()
        );
        for (section, count) in &summary.per_section {
            println!("   {} {}", format!("{:>4}", count).cyan(), section);
        }
    }

    println!();
    println!("{}", format!("📄 Saved: {}", output.display()).bright_black());
}
