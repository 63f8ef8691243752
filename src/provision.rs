//! The provisioning sequence: toolchain upgrade, then dependency install.
//!
//! Both steps delegate to pip through the resolved interpreter. Child
//! stdout/stderr are inherited, so pip's own reporting reaches the console
//! unmodified. The first failing step aborts the sequence and its exit code
//! becomes the process exit code; there is no retry and no rollback.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::paths::MANIFEST_FILE;
use crate::python::Interpreter;
use crate::ui;

/// Packages upgraded ahead of the install step.
pub const TOOLCHAIN_PACKAGES: [&str; 3] = ["pip", "setuptools", "wheel"];

/// A provisioning step that exited non-zero, with the code pip reported.
///
/// Carried through the `anyhow` chain so the binary can terminate with the
/// failing tool's own exit code.
#[derive(Debug)]
pub struct StepFailed {
    pub step: &'static str,
    pub code: Option<i32>,
}

impl fmt::Display for StepFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} step failed with exit code {}", self.step, code),
            None => write!(f, "{} step was terminated by a signal", self.step),
        }
    }
}

impl std::error::Error for StepFailed {}

/// Options for a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Explicit interpreter override (flag wins over config).
    pub python: Option<PathBuf>,
    /// Dependency manifest fed to the install step.
    pub manifest: PathBuf,
    /// Print the commands without executing them.
    pub dry_run: bool,
    /// Skip the toolchain upgrade step.
    pub skip_upgrade: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            python: None,
            manifest: PathBuf::from(MANIFEST_FILE),
            dry_run: false,
            skip_upgrade: false,
        }
    }
}

impl ProvisionOptions {
    /// Build options from config, with defaults for everything unset.
    pub fn from_config(config: &Config) -> Self {
        Self {
            python: config.python_override(),
            manifest: config
                .manifest_path()
                .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE)),
            ..Self::default()
        }
    }
}

/// Run the full provisioning sequence.
pub fn run(options: &ProvisionOptions) -> Result<()> {
    let interpreter = Interpreter::resolve(options.python.as_deref())?;

    ui::status(&format!(
        "Provisioning with {} ({})",
        ui::colors::identifier(&interpreter.command.display().to_string()),
        interpreter.version
    ));

    if options.skip_upgrade {
        ui::status(&format!(
            "{}",
            ui::colors::warning("Skipping packaging toolchain upgrade")
        ));
    } else {
        upgrade_toolchain(&interpreter, options.dry_run)?;
    }

    install_manifest(&interpreter, &options.manifest, options.dry_run)?;

    ui::status(&format!("{}", ui::colors::success("Environment ready.")));
    Ok(())
}

/// Upgrade pip, setuptools and wheel to their latest compatible versions.
pub fn upgrade_toolchain(interpreter: &Interpreter, dry_run: bool) -> Result<()> {
    ui::status("Upgrading packaging toolchain (pip, setuptools, wheel)...");

    let mut command = interpreter.pip_command();
    command.args(["install", "--upgrade"]).args(TOOLCHAIN_PACKAGES);

    run_step("upgrade", &mut command, dry_run)
}

/// Install every dependency listed in the manifest.
pub fn install_manifest(interpreter: &Interpreter, manifest: &Path, dry_run: bool) -> Result<()> {
    if !dry_run && !manifest.exists() {
        anyhow::bail!(
            "Dependency manifest {} not found in the working directory",
            manifest.display()
        );
    }

    ui::status(&format!(
        "Installing dependencies from {}...",
        ui::colors::identifier(&manifest.display().to_string())
    ));

    let mut command = interpreter.pip_command();
    command.args(["install", "-r"]).arg(manifest);

    run_step("install", &mut command, dry_run)
}

/// Invoke one pip step, inheriting stdio so the tool's output passes through.
fn run_step(step: &'static str, command: &mut Command, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("[dry-run] {}", render_command(command));
        return Ok(());
    }

    let status = command
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| {
            format!(
                "Failed to invoke {}",
                command.get_program().to_string_lossy()
            )
        })?;

    if !status.success() {
        return Err(StepFailed {
            step,
            code: status.code(),
        }
        .into());
    }

    Ok(())
}

/// Render a command line for dry-run display.
fn render_command(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(command.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
