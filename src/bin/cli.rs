//! testmeta CLI - builds the test metadata catalog for a project.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use testmeta::config::CONFIG_FILE_NAME;
use testmeta::{run_backend, run_frontend, BackendSummary, FrontendSummary, TestmetaConfig};

#[derive(Parser)]
#[command(name = "testmeta")]
#[command(about = "testmeta - Test metadata extraction (locators, endpoints, UI routes)", long_about = None)]
struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/testmeta.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Extract locators, endpoints and UI routes from front-end sources
    Frontend,

    /// Merge annotation-declared back-end endpoints into the endpoint catalog
    Backend,

    /// Front-end extraction followed by the back-end merge
    All,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    let config = TestmetaConfig::load_with_env(&config_path);

    match cli.command.unwrap_or(Commands::All) {
        Commands::Frontend => {
            let summary = run_frontend(&cli.root, &config).context("front-end extraction failed")?;
            print_frontend(&summary, &config, &cli.root);
        }
        Commands::Backend => {
            let summary = run_backend(&cli.root, &config).context("back-end extraction failed")?;
            print_backend(&summary);
        }
        Commands::All => {
            let frontend = run_frontend(&cli.root, &config).context("front-end extraction failed")?;
            print_frontend(&frontend, &config, &cli.root);
            let backend = run_backend(&cli.root, &config).context("back-end extraction failed")?;
            print_backend(&backend);
        }
    }

    Ok(())
}

fn print_frontend(summary: &FrontendSummary, config: &TestmetaConfig, root: &std::path::Path) {
    println!(
        "✓ Extracted {} locators, {} endpoints, {} UI routes from {} files ({} skipped) -> {}",
        summary.locators,
        summary.endpoints,
        summary.ui_routes,
        summary.files_scanned,
        summary.files_skipped,
        config.resolve_output_dir(root).display()
    );
}

fn print_backend(summary: &BackendSummary) {
    for entry in &summary.added {
        println!("  + {}", entry);
    }
    println!(
        "✓ Found {} back-end endpoints in {} files, {} new, {} total",
        summary.endpoints_found,
        summary.files_scanned,
        summary.added.len(),
        summary.total
    );
}
