//! Python interpreter resolution.
//!
//! Groundwork never bundles an interpreter: every step runs pip through
//! whatever Python the host already has. Resolution order:
//!
//! 1. Explicit override (config `toolchain.python` or `--python`)
//! 2. The active virtualenv's interpreter (`$VIRTUAL_ENV`)
//! 3. `python3` on PATH
//! 4. `python` on PATH
//!
//! A candidate is accepted when invoking it with `--version` succeeds.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A resolved interpreter, probed and ready to invoke.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// Command name or path used to invoke the interpreter.
    pub command: PathBuf,
    /// Version string reported by `--version`, e.g. "Python 3.12.1".
    pub version: String,
}

impl Interpreter {
    /// Resolve the interpreter to provision against.
    ///
    /// An explicit override must be usable; candidates from the default
    /// list are skipped silently when probing fails.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return probe(path).with_context(|| {
                format!("Configured interpreter {} is not usable", path.display())
            });
        }

        for candidate in default_candidates() {
            if let Ok(interpreter) = probe(&candidate) {
                return Ok(interpreter);
            }
        }

        bail!(
            "No Python interpreter found. Install Python 3, activate a virtualenv, \
             or set toolchain.python in .groundwork/config.md"
        );
    }

    /// Start building a pip invocation through this interpreter.
    ///
    /// Running pip as `python -m pip` keeps the upgrade and install steps
    /// bound to the same interpreter the resolution picked.
    pub fn pip_command(&self) -> Command {
        let mut command = Command::new(&self.command);
        command.args(["-m", "pip"]);
        command
    }
}

/// Candidate interpreters in resolution order.
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(venv) = std::env::var("VIRTUAL_ENV") {
        if !venv.is_empty() {
            #[cfg(unix)]
            candidates.push(Path::new(&venv).join("bin/python"));
            #[cfg(not(unix))]
            candidates.push(Path::new(&venv).join("Scripts/python.exe"));
        }
    }

    candidates.push(PathBuf::from("python3"));
    candidates.push(PathBuf::from("python"));
    candidates
}

/// Probe a candidate by asking it for its version.
fn probe(command: &Path) -> Result<Interpreter> {
    let output = Command::new(command)
        .arg("--version")
        .output()
        .with_context(|| format!("Failed to invoke {}", command.display()))?;

    if !output.status.success() {
        bail!("{} exited with status {}", command.display(), output.status);
    }

    // Python 2 reported its version on stderr; 3.4+ uses stdout.
    let raw = if output.stdout.is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    let version = String::from_utf8_lossy(raw).trim().to_string();

    Ok(Interpreter {
        command: command.to_path_buf(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    #[cfg(unix)]
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_stub(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_candidates_without_virtualenv() {
        std::env::remove_var("VIRTUAL_ENV");

        let candidates = default_candidates();
        assert_eq!(
            candidates,
            vec![PathBuf::from("python3"), PathBuf::from("python")]
        );
    }

    #[test]
    #[serial]
    fn test_virtualenv_is_first_candidate() {
        std::env::set_var("VIRTUAL_ENV", "/opt/venvs/app");

        let candidates = default_candidates();
        #[cfg(unix)]
        assert_eq!(candidates[0], PathBuf::from("/opt/venvs/app/bin/python"));
        assert_eq!(candidates.len(), 3);

        std::env::remove_var("VIRTUAL_ENV");
    }

    #[test]
    #[cfg(unix)]
    fn test_probe_reads_version() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_stub(
            temp_dir.path(),
            "python3",
            "#!/bin/sh\necho \"Python 3.12.0\"\n",
        );

        let interpreter = probe(&stub).unwrap();
        assert_eq!(interpreter.version, "Python 3.12.0");
        assert_eq!(interpreter.command, stub);
    }

    #[test]
    #[cfg(unix)]
    fn test_probe_reads_version_from_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_stub(
            temp_dir.path(),
            "python",
            "#!/bin/sh\necho \"Python 2.7.18\" >&2\n",
        );

        let interpreter = probe(&stub).unwrap();
        assert_eq!(interpreter.version, "Python 2.7.18");
    }

    #[test]
    #[cfg(unix)]
    fn test_probe_rejects_failing_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let stub = write_stub(temp_dir.path(), "python3", "#!/bin/sh\nexit 1\n");

        assert!(probe(&stub).is_err());
    }

    #[test]
    fn test_resolve_explicit_override_must_work() {
        let result = Interpreter::resolve(Some(Path::new("/nonexistent/python")));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not usable"));
    }

    #[test]
    #[cfg(unix)]
    fn test_pip_command_shape() {
        let interpreter = Interpreter {
            command: PathBuf::from("python3"),
            version: "Python 3.12.0".to_string(),
        };

        let command = interpreter.pip_command();
        let args: Vec<String> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["-m", "pip"]);
    }
}
