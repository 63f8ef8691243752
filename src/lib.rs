//! # Groundwork - Deployment Environment Provisioner
//!
//! Groundwork prepares a Python deployment environment in one pass: it
//! upgrades the packaging toolchain (pip, setuptools, wheel), then installs
//! every dependency declared in the project manifest. All package work is
//! delegated to pip; groundwork supplies the fixed sequence, the status
//! reporting, and fail-fast exit-status propagation.
//!
//! ## Core Concepts
//!
//! - **Manifest**: a `requirements.txt`-format file listing the dependencies
//!   the install step feeds to `pip install -r`
//! - **Interpreter resolution**: the Python the steps run against, resolved
//!   from an explicit override, the active virtualenv, or PATH
//! - **Checks**: pre-flight diagnostics confirming a host can complete a
//!   provisioning pass
//!
//! ## Modules
//!
//! - [`provision`] - the two-step provisioning sequence
//! - [`python`] - interpreter resolution and probing
//! - [`doctor`] - pre-flight environment checks
//! - [`config`] - configuration for groundwork projects
//! - [`ui`] - console formatting helpers
//!
//! ## Example
//!
//! ```no_run
//! use groundwork::config::Config;
//! use groundwork::provision::{self, ProvisionOptions};
//!
//! // Load project configuration (defaults when no config file exists)
//! let config = Config::load().expect("Failed to load config");
//!
//! // Provision: upgrade the toolchain, then install the manifest
//! let options = ProvisionOptions::from_config(&config);
//! provision::run(&options).expect("Provisioning failed");
//! ```

// Re-export all public modules
pub mod config;
pub mod doctor;
pub mod provision;
pub mod python;
pub mod ui;

/// Default path constants for the groundwork directory structure.
pub mod paths {
    /// Dependency manifest consumed by the install step: `requirements.txt`
    pub const MANIFEST_FILE: &str = "requirements.txt";
    /// Project configuration file: `.groundwork/config.md`
    pub const CONFIG_FILE: &str = ".groundwork/config.md";
}
