use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use qakit::cli::api_checklist::ApiChecklistArgs;
use qakit::cli::checklist::ChecklistArgs;
use qakit::cli::json_to_md::JsonToMdArgs;
use qakit::{QakitConfig, Result};
use std::env;
use std::io;
use std::path::PathBuf;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "QAKIT_LOG";

#[derive(Parser)]
#[command(name = "qakit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "QA toolkit: requirement and API checklists, JSON reports", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ./qakit.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a regression checklist CSV from a Markdown requirements document
    Checklist(ChecklistArgs),

    /// Build an API checklist CSV from an OpenAPI (Swagger) JSON document
    #[command(name = "api-checklist")]
    ApiChecklist(ApiChecklistArgs),

    /// Convert JSON files to readable Markdown
    #[command(name = "json-to-md")]
    JsonToMd(JsonToMdArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let load_config = || -> Result<QakitConfig> {
        let project_root = env::current_dir()?;
        QakitConfig::load(&project_root, cli.config.as_deref())
    };

    match cli.command {
        Commands::Checklist(args) => {
            qakit::cli::checklist::run(args, load_config()?)?;
        }

        Commands::ApiChecklist(args) => {
            qakit::cli::api_checklist::run(args)?;
        }

        Commands::JsonToMd(args) => {
            qakit::cli::json_to_md::run(args, load_config()?)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "qakit", &mut io::stdout());
        }
    }

    Ok(())
}
