use std::process::Command;

/// Run a command and return its trimmed stdout, or None if it fails or
/// prints nothing.
fn probe(command: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(command).args(args).output().ok()?;
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn main() {
    // Env vars take precedence so CI/Docker builds can pin these without
    // a git checkout or a working `date`.
    let git_sha = std::env::var("GIT_SHA")
        .ok()
        .or_else(|| probe("git", &["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_SHA={}", git_sha);

    let build_date = std::env::var("BUILD_DATE")
        .ok()
        .or_else(|| probe("date", &["+%Y-%m-%d"]))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
