//! Pre-flight environment checks for the provisioner.
//!
//! `groundwork check` runs these ahead of a deployment to confirm the host
//! can complete a provisioning pass: an interpreter is reachable, pip is
//! importable through it, and the dependency manifest is present. Checks
//! never mutate the environment.

use std::fs;
use std::path::Path;

use crate::python::Interpreter;
use crate::ui;

/// A single diagnostic check result.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub details: Option<String>,
}

impl CheckResult {
    pub fn pass_with_details(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            details: Some(details.into()),
        }
    }

    pub fn fail(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            details: Some(details.into()),
        }
    }
}

/// Run all environment checks.
///
/// `python` is the explicit interpreter override, if any; `manifest` is the
/// manifest path the install step would use.
pub fn run_checks(python: Option<&Path>, manifest: &Path) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let interpreter = match Interpreter::resolve(python) {
        Ok(interpreter) => {
            checks.push(CheckResult::pass_with_details(
                "Interpreter",
                format!("{} ({})", interpreter.command.display(), interpreter.version),
            ));
            Some(interpreter)
        }
        Err(e) => {
            checks.push(CheckResult::fail("Interpreter", e.to_string()));
            None
        }
    };

    checks.push(match &interpreter {
        Some(interpreter) => check_pip(interpreter),
        None => CheckResult::fail("pip module", "Skipped: no interpreter"),
    });

    checks.push(check_manifest(manifest));

    checks
}

/// Check that pip is importable through the interpreter.
fn check_pip(interpreter: &Interpreter) -> CheckResult {
    let mut command = interpreter.pip_command();

    match command.arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            CheckResult::pass_with_details("pip module", version)
        }
        Ok(output) => CheckResult::fail(
            "pip module",
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ),
        Err(e) => CheckResult::fail("pip module", format!("Cannot invoke interpreter: {}", e)),
    }
}

/// Check that the manifest exists and count its requirement lines.
fn check_manifest(manifest: &Path) -> CheckResult {
    if !manifest.exists() {
        return CheckResult::fail(
            "Manifest",
            format!("{} does not exist", manifest.display()),
        );
    }

    match fs::read_to_string(manifest) {
        Ok(content) => {
            let requirements = count_requirements(&content);
            CheckResult::pass_with_details(
                "Manifest",
                format!("{} ({} requirements)", manifest.display(), requirements),
            )
        }
        Err(e) => CheckResult::fail("Manifest", format!("Cannot read: {}", e)),
    }
}

/// Count requirement lines, skipping blanks and comments.
fn count_requirements(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}

/// Render the check report. Returns true when every check passed.
pub fn render_report(checks: &[CheckResult]) -> bool {
    let mut all_passed = true;

    for check in checks {
        let icon = ui::check_icon(check.passed);
        match &check.details {
            Some(details) => println!("{} {}: {}", icon, check.name, details),
            None => println!("{} {}", icon, check.name),
        }
        if !check.passed {
            all_passed = false;
        }
    }

    all_passed
}
