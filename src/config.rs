//! Configuration management for groundwork projects.
//!
//! Configuration is optional: a host with no config file provisions with
//! stock behavior (`python3` against `requirements.txt` in the working
//! directory), so the bare `groundwork` invocation needs nothing in place.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::CONFIG_FILE;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

/// Interpreter selection overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolchainConfig {
    /// Explicit path to the Python interpreter to provision against.
    #[serde(default)]
    pub python: Option<String>,
}

/// Install step overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallConfig {
    /// Path to the dependency manifest, relative to the working directory.
    #[serde(default)]
    pub manifest: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// Lookup order (first file found wins):
    /// 1. Project config (`.groundwork/config.md`)
    /// 2. Global config (`~/.config/groundwork/config.md`)
    ///
    /// Returns the default (empty) config when neither exists.
    pub fn load() -> Result<Self> {
        Self::load_from_candidates(Path::new(CONFIG_FILE), global_config_path().as_deref())
    }

    /// Load from the given project and global candidate paths.
    pub fn load_from_candidates(
        project_path: &Path,
        global_path: Option<&Path>,
    ) -> Result<Self> {
        if project_path.exists() {
            return Self::load_from(project_path);
        }

        if let Some(global) = global_path {
            if global.exists() {
                return Self::load_from(global);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        Ok(config)
    }

    /// Configured interpreter override, with tilde expansion applied.
    pub fn python_override(&self) -> Option<PathBuf> {
        self.toolchain
            .python
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }

    /// Configured manifest path, with tilde expansion applied.
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.install
            .manifest
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }
}

/// Returns the path to the global config file at ~/.config/groundwork/config.md
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/groundwork/config.md"))
}

/// Split content into frontmatter and body.
///
/// If the content starts with `---`, extracts the YAML frontmatter between
/// the first and second `---` delimiters, and returns the body after.
/// Otherwise returns None for frontmatter and the entire content as body.
fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };

    match rest.find("---") {
        Some(end) => {
            let frontmatter = rest[..end].to_string();
            let body = rest[end + 3..].trim_start();
            (Some(frontmatter), body)
        }
        None => (None, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let content = r#"---
toolchain:
  python: /usr/local/bin/python3.12
install:
  manifest: deploy/requirements.txt
---

# Groundwork Config
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(
            config.toolchain.python.as_deref(),
            Some("/usr/local/bin/python3.12")
        );
        assert_eq!(
            config.install.manifest.as_deref(),
            Some("deploy/requirements.txt")
        );
    }

    #[test]
    fn test_parse_empty_frontmatter_is_default() {
        let config = Config::parse("---\n---\n# Notes\n").unwrap();
        assert!(config.toolchain.python.is_none());
        assert!(config.install.manifest.is_none());
    }

    #[test]
    fn test_parse_without_frontmatter_fails() {
        let result = Config::parse("# Just a heading\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_files_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join(".groundwork/config.md");
        let global = temp_dir.path().join("global/config.md");

        let config = Config::load_from_candidates(&project, Some(&global)).unwrap();
        assert!(config.toolchain.python.is_none());
        assert!(config.install.manifest.is_none());
    }

    #[test]
    fn test_project_config_wins_over_global() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join(".groundwork/config.md");
        let global = temp_dir.path().join("global/config.md");

        fs::create_dir_all(project.parent().unwrap()).unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&project, "---\ninstall:\n  manifest: project.txt\n---\n").unwrap();
        fs::write(&global, "---\ninstall:\n  manifest: global.txt\n---\n").unwrap();

        let config = Config::load_from_candidates(&project, Some(&global)).unwrap();
        assert_eq!(config.install.manifest.as_deref(), Some("project.txt"));
    }

    #[test]
    fn test_global_config_used_when_project_absent() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join(".groundwork/config.md");
        let global = temp_dir.path().join("global/config.md");

        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "---\ninstall:\n  manifest: global.txt\n---\n").unwrap();

        let config = Config::load_from_candidates(&project, Some(&global)).unwrap();
        assert_eq!(config.install.manifest.as_deref(), Some("global.txt"));
    }

    #[test]
    fn test_tilde_expansion() {
        let config =
            Config::parse("---\ntoolchain:\n  python: ~/venvs/app/bin/python\n---\n").unwrap();

        let expanded = config.python_override().unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("venvs/app/bin/python"));
    }

    #[test]
    fn test_split_frontmatter_roundtrip() {
        let (frontmatter, body) = split_frontmatter("---\nkey: value\n---\nbody text");
        assert_eq!(frontmatter.unwrap().trim(), "key: value");
        assert_eq!(body, "body text");

        let (frontmatter, body) = split_frontmatter("no frontmatter here");
        assert!(frontmatter.is_none());
        assert_eq!(body, "no frontmatter here");
    }
}
