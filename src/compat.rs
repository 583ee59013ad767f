//! pkgcheck compatibility-update reader.
//!
//! `pkgcheck scan --reporter JsonStream` writes one JSON object per line.
//! Only `PythonCompatUpdate` results are of interest: they name a package
//! version and the implementations it could additionally support.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{ImplsError, Result};

/// `__class__` value of the results we consume.
pub const COMPAT_UPDATE_CLASS: &str = "PythonCompatUpdate";

/// Result class tag carried by every JsonStream line.
#[derive(Debug, Deserialize)]
struct ResultClass {
    #[serde(rename = "__class__")]
    class: String,
}

/// A `PythonCompatUpdate` result.
#[derive(Debug, Clone, Deserialize)]
pub struct PythonCompatUpdate {
    pub category: String,
    pub package: String,
    pub version: String,
    /// Suggested `PYTHON_COMPAT` names.
    pub updates: Vec<String>,
}

impl PythonCompatUpdate {
    /// `category/package-version`.
    pub fn cpv(&self) -> String {
        format!("{}/{}-{}", self.category, self.package, self.version)
    }
}

/// Suggested implementations keyed by `category/package-version`.
#[derive(Debug, Clone, Default)]
pub struct CompatUpdates {
    updates: HashMap<String, Vec<String>>,
}

impl CompatUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record suggestions for a version, replacing earlier ones.
    pub fn insert(&mut self, cpv: impl Into<String>, updates: Vec<String>) {
        self.updates.insert(cpv.into(), updates);
    }

    /// Suggestions for `cpv`, empty when there are none.
    pub fn get(&self, cpv: &str) -> &[String] {
        self.updates.get(cpv).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Read the pkgcheck output at `path`, or nothing when no path is given.
///
/// Any line that is not a JSON object with a `__class__` string, or a
/// `PythonCompatUpdate` missing one of its fields, aborts the read.
pub fn read_compat_updates(path: Option<&Path>) -> Result<CompatUpdates> {
    let mut updates = CompatUpdates::new();
    let Some(path) = path else {
        return Ok(updates);
    };

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parse_error = |source: serde_json::Error| ImplsError::CompatLogParse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        };

        let value: serde_json::Value = serde_json::from_str(&line).map_err(parse_error)?;
        let tag = ResultClass::deserialize(&value).map_err(parse_error)?;
        if tag.class != COMPAT_UPDATE_CLASS {
            continue;
        }
        let result: PythonCompatUpdate = serde_json::from_value(value).map_err(parse_error)?;
        tracing::trace!("{}: {:?}", result.cpv(), result.updates);
        updates.insert(result.cpv(), result.updates);
    }

    tracing::debug!(
        "Read {} compatibility updates from {}",
        updates.len(),
        path.display()
    );
    Ok(updates)
}
