//! pyimpls - Python implementation support per Gentoo package.
//!
//! pyimpls reads an ebuild repository's metadata cache and prints, for each
//! slotted package that uses Python, the implementations its newest stable
//! and testing versions support, along with any newer implementations that
//! pkgcheck suggests adding.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compat`] - pkgcheck `PythonCompatUpdate` reader
//! - [`error`] - Error types and result aliases
//! - [`implementations`] - Python implementations and their registry
//! - [`report`] - Group scan and line formatting
//! - [`repository`] - Repository metadata, versions and keywords
//!
//! # Example
//!
//! ```
//! use pyimpls::implementations::ImplementationRegistry;
//!
//! let registry = ImplementationRegistry::builtin();
//! assert_eq!(registry.short_name("python3_12").unwrap(), "3.12");
//! assert_eq!(registry.short_name("pypy3_11").unwrap(), "pypy3.11");
//! ```
//!
//! For repository-based reports, see the integration tests.

pub mod cli;
pub mod compat;
pub mod error;
pub mod implementations;
pub mod report;
pub mod repository;

pub use error::{ImplsError, Result};
