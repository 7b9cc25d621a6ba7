//! API checklist CLI command
//!
//! Reads an OpenAPI (Swagger) JSON document and writes the API checklist CSV.

use crate::api::{self, ApiChecklistReport};
use crate::models::ApiChecklistJsonOutput;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ApiChecklistArgs {
    /// OpenAPI / Swagger document (JSON)
    pub input: PathBuf,

    /// Output CSV path (default: API-ЧекЛист-<input stem>.csv next to the input)
    pub output: Option<PathBuf>,

    /// Project name in the sheet title (default: API title)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ApiChecklistArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| api::default_output_path(&args.input));

    if !args.json {
        println!("{}", format!("📖 Loading: {}", args.input.display()).cyan());
    }

    let report = api::generate(&args.input, &output, args.project.as_deref())?;

    if args.json {
        print_json(report)?;
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_json(report: ApiChecklistReport) -> Result<()> {
    let per_section = report.per_section();
    let output = ApiChecklistJsonOutput {
        project: report.project,
        api: report.info,
        output: report.output.display().to_string(),
        endpoints: report.endpoints,
        per_section,
        cases: report.cases,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(report: &ApiChecklistReport) {
    println!("📋 API: {} v{}", report.info.title.bold(), report.info.version);
    println!("🔍 Endpoints: {}", report.endpoints);
    println!(
        "{}",
        format!("✨ Generated {} API checks", report.cases.len()).green().bold()
    );

    println!();
    println!("📊 By section:");
    for (section, count) in report.per_section() {
        println!("   {} {}", format!("{:>4}", count).cyan(), section);
    }

    println!();
    println!("{}", format!("✅ Saved: {}", report.output.display()).bright_black());
}
