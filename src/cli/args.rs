//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::repository::{DEFAULT_REPO_LOCATION, DEFAULT_REPO_NAME};

/// pyimpls - Python implementation support per Gentoo package.
#[derive(Debug, Parser)]
#[command(name = "pyimpls")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Arguments for the report.
#[derive(Debug, Clone, clap::Args)]
pub struct ReportArgs {
    /// Path to pkgcheck JsonStream with PythonCompatCheck results
    #[arg(long, value_name = "PATH")]
    pub pkgcheck_output: Option<PathBuf>,

    /// Use mIRC color codes in output
    #[arg(long)]
    pub color: bool,

    /// Location of the ebuild repository
    #[arg(long, value_name = "PATH", env = "PYIMPLS_REPO", default_value = DEFAULT_REPO_LOCATION)]
    pub repo: PathBuf,

    /// Expected repository name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_REPO_NAME)]
    pub repo_name: String,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            pkgcheck_output: None,
            color: false,
            repo: PathBuf::from(DEFAULT_REPO_LOCATION),
            repo_name: DEFAULT_REPO_NAME.to_string(),
        }
    }
}
