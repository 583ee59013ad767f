//! Python implementations.
//!
//! An implementation is a `PYTHON_COMPAT` name such as `python3_12` or
//! `pypy3_11`. The report shows its short name (`3.12`, `pypy3.11`).
//!
//! - [`registry`] - Lookup table of known implementations

pub mod registry;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ImplsError, Result};

pub use registry::ImplementationRegistry;

static CPYTHON_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^python(\d+)_(\d+)(t?)$").expect("CPYTHON_REGEX must compile")
});

static PYPY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^pypy(\d+)(?:_(\d+))?$").expect("PYPY_REGEX must compile")
});

/// A Python implementation known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implementation {
    name: String,
    short_name: String,
}

impl Implementation {
    /// Build an implementation from its `PYTHON_COMPAT` name.
    pub fn from_name(name: &str) -> Result<Self> {
        let short_name = if let Some(caps) = CPYTHON_REGEX.captures(name) {
            format!("{}.{}{}", &caps[1], &caps[2], &caps[3])
        } else if let Some(caps) = PYPY_REGEX.captures(name) {
            match caps.get(2) {
                Some(minor) => format!("pypy{}.{}", &caps[1], minor.as_str()),
                None => format!("pypy{}", &caps[1]),
            }
        } else {
            return Err(ImplsError::UnknownImplementation {
                name: name.to_string(),
            });
        };

        Ok(Self {
            name: name.to_string(),
            short_name,
        })
    }

    /// `PYTHON_COMPAT` name, e.g. `python3_12`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name, e.g. `3.12`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name)
    }
}
