//! Implementation registry.
//!
//! The registry holds the built-in list of implementations plus whatever the
//! repository's `python-utils-r1.eclass` declares in `_PYTHON_ALL_IMPLS`, so
//! newly added interpreters are picked up without a release of this tool.
//! It is built once at startup and passed by reference.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

use super::Implementation;
use crate::error::{ImplsError, Result};

/// Eclass declaring the supported implementations, relative to the repository.
const UTILS_ECLASS: &str = "eclass/python-utils-r1.eclass";

/// Implementations known without consulting the repository.
const BUILTIN_IMPLS: &[&str] = &[
    "python2_7",
    "python3_6",
    "python3_7",
    "python3_8",
    "python3_9",
    "python3_10",
    "python3_11",
    "python3_12",
    "python3_13",
    "python3_14",
    "python3_13t",
    "python3_14t",
    "pypy3",
    "pypy3_11",
];

static RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\{(\d+)\.\.(\d+)\}(.*)$").expect("RANGE_REGEX must compile")
});

/// Lookup table from `PYTHON_COMPAT` names to implementations.
#[derive(Debug, Clone)]
pub struct ImplementationRegistry {
    impls: HashMap<String, Implementation>,
}

impl ImplementationRegistry {
    /// Create a registry with the built-in implementations.
    pub fn builtin() -> Self {
        let mut registry = Self {
            impls: HashMap::new(),
        };
        for name in BUILTIN_IMPLS {
            if let Ok(i) = Implementation::from_name(name) {
                registry.insert(i);
            }
        }
        registry
    }

    /// Create a registry from the built-ins and the repository's eclass.
    ///
    /// A repository without `python-utils-r1.eclass` yields the built-ins
    /// only.
    pub fn load(repo_location: &Path) -> Result<Self> {
        let mut registry = Self::builtin();
        let path = repo_location.join(UTILS_ECLASS);
        if !path.is_file() {
            tracing::debug!("{} not found, using built-in implementations", path.display());
            return Ok(registry);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        for name in parse_all_impls(&content) {
            match Implementation::from_name(&name) {
                Ok(i) => registry.insert(i),
                Err(_) => tracing::warn!("Ignoring unrecognised implementation '{}'", name),
            }
        }
        tracing::debug!("Registry holds {} implementations", registry.len());
        Ok(registry)
    }

    /// Add an implementation, replacing any entry with the same name.
    pub fn insert(&mut self, implementation: Implementation) {
        self.impls
            .insert(implementation.name().to_string(), implementation);
    }

    /// Look up an implementation by `PYTHON_COMPAT` name.
    pub fn get(&self, name: &str) -> Result<&Implementation> {
        self.impls
            .get(name)
            .ok_or_else(|| ImplsError::UnknownImplementation {
                name: name.to_string(),
            })
    }

    /// Resolve a name straight to its short name.
    pub fn short_name(&self, name: &str) -> Result<&str> {
        self.get(name).map(Implementation::short_name)
    }

    /// Number of registered implementations.
    pub fn len(&self) -> usize {
        self.impls.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.impls.is_empty()
    }
}

impl Default for ImplementationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Extract the names listed in `_PYTHON_ALL_IMPLS=( ... )`.
///
/// The array may span several lines and use `{N..M}` ranges.
fn parse_all_impls(content: &str) -> Vec<String> {
    let Some(start) = content.find("_PYTHON_ALL_IMPLS=(") else {
        return Vec::new();
    };
    let body = &content[start + "_PYTHON_ALL_IMPLS=(".len()..];
    let body = body.split(')').next().unwrap_or("");

    body.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace)
        .flat_map(expand_range)
        .collect()
}

/// Expand a single `{N..M}` numeric range, as bash would.
fn expand_range(word: &str) -> Vec<String> {
    let Some(caps) = RANGE_REGEX.captures(word) else {
        return vec![word.to_string()];
    };
    let (Ok(from), Ok(to)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
        return vec![word.to_string()];
    };
    let numbers: Vec<u32> = if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    };
    numbers
        .into_iter()
        .map(|n| format!("{}{}{}", &caps[1], n, &caps[4]))
        .collect()
}
