//! Package version records.

use std::path::PathBuf;

use super::class::{classify, PackageClass};
use super::version::Version;

/// Metadata of a single package version.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// Category, e.g. `dev-python`.
    pub category: String,
    /// Package name, e.g. `requests`.
    pub package: String,
    pub version: Version,
    /// Slot without the sub-slot part.
    pub slot: String,
    pub eapi: String,
    /// Declared Python implementations, `None` when Python is not used.
    pub implementations: Option<Vec<String>>,
    pub keywords: Vec<String>,
    /// Eclasses inherited, directly or indirectly.
    pub inherits: Vec<String>,
    pub restrict: Vec<String>,
    pub properties: Vec<String>,
    /// Path to the ebuild.
    pub path: PathBuf,
}

impl PackageRecord {
    /// `category/package-version`.
    pub fn cpv(&self) -> String {
        format!("{}/{}-{}", self.category, self.package, self.version)
    }

    /// `category/package:slot`.
    pub fn slotted_atom(&self) -> String {
        format!("{}/{}:{}", self.category, self.package, self.slot)
    }

    pub fn class(&self) -> PackageClass {
        classify(&self.keywords)
    }

    pub fn inherits(&self, eclass: &str) -> bool {
        self.inherits.iter().any(|e| e == eclass)
    }

    pub fn restricts(&self, token: &str) -> bool {
        self.restrict.iter().any(|r| r == token)
    }

    pub fn has_property(&self, token: &str) -> bool {
        self.properties.iter().any(|p| p == token)
    }
}
