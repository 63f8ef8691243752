//! CLI entry point and command handlers for groundwork.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

use groundwork::config::Config;
use groundwork::provision::{self, ProvisionOptions, StepFailed};
use groundwork::{doctor, ui};

#[derive(Parser)]
#[command(name = "groundwork")]
#[command(version)]
#[command(about = "Deployment environment provisioner", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    groundwork                 Upgrade the packaging toolchain and install\n                               everything in requirements.txt\n    groundwork check           Verify the host can complete a provisioning pass"
)]
struct Cli {
    /// With no subcommand, provisions the environment with defaults.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade the packaging toolchain, then install manifest dependencies
    Up {
        /// Path to the dependency manifest (default: requirements.txt)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Python interpreter to provision against
        #[arg(long)]
        python: Option<PathBuf>,
        /// Show the commands without executing them
        #[arg(long)]
        dry_run: bool,
        /// Skip the packaging toolchain upgrade step
        #[arg(long)]
        skip_upgrade: bool,
    },
    /// Check that the host environment can be provisioned
    Check {
        /// Path to the dependency manifest (default: requirements.txt)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Python interpreter to check
        #[arg(long)]
        python: Option<PathBuf>,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Show additional build information
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), error);

        // A failing pip step carries the tool's own exit code; everything
        // else terminates with 1.
        let code = error
            .downcast_ref::<StepFailed>()
            .and_then(|step| step.code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => cmd_up(None, None, false, false),
        Some(Commands::Up {
            manifest,
            python,
            dry_run,
            skip_upgrade,
        }) => cmd_up(manifest, python, dry_run, skip_upgrade),
        Some(Commands::Check { manifest, python }) => cmd_check(manifest, python),
        Some(Commands::Completion { shell }) => cmd_completion(shell),
        Some(Commands::Version { verbose }) => cmd_version(verbose),
    }
}

/// Run the provisioning sequence: toolchain upgrade, then manifest install.
fn cmd_up(
    manifest: Option<PathBuf>,
    python: Option<PathBuf>,
    dry_run: bool,
    skip_upgrade: bool,
) -> Result<()> {
    let config = Config::load()?;

    let mut options = ProvisionOptions::from_config(&config);
    if let Some(manifest) = manifest {
        options.manifest = manifest;
    }
    if let Some(python) = python {
        options.python = Some(python);
    }
    options.dry_run = dry_run;
    options.skip_upgrade = skip_upgrade;

    provision::run(&options)
}

/// Run pre-flight checks and render the report.
fn cmd_check(manifest: Option<PathBuf>, python: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;

    let defaults = ProvisionOptions::from_config(&config);
    let manifest = manifest.unwrap_or(defaults.manifest);
    let python = python.or(defaults.python);

    let checks = doctor::run_checks(python.as_deref(), &manifest);
    if !doctor::render_report(&checks) {
        println!();
        println!("{}", ui::colors::error("Environment is not ready."));
        std::process::exit(1);
    }

    ui::status(&format!(
        "{}",
        ui::colors::success("Environment can be provisioned.")
    ));
    Ok(())
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "groundwork", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("groundwork {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}
