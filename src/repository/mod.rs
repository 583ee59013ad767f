//! Ebuild repository access.
//!
//! The report never sources ebuilds. Package metadata comes from the
//! repository's pre-generated `metadata/md5-cache`, and ebuild files are only
//! opened later for line-based flag scanning.
//!
//! # Architecture
//!
//! - [`cache`] - Metadata cache entry parsing
//! - [`class`] - Keyword classification
//! - [`group`] - Grouping of sorted package lists
//! - [`package`] - Package version records
//! - [`version`] - Version parsing and ordering

pub mod cache;
pub mod class;
pub mod group;
pub mod package;
pub mod version;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{ImplsError, Result};

pub use class::{classify, PackageClass};
pub use group::group_by_key;
pub use package::PackageRecord;
pub use version::Version;

/// Name of the repository the report targets by default.
pub const DEFAULT_REPO_NAME: &str = "gentoo";

/// Default location of the main repository.
pub const DEFAULT_REPO_LOCATION: &str = "/var/db/repos/gentoo";

/// A source of package records.
pub trait PackageSource {
    /// Repository name.
    fn name(&self) -> &str;

    /// All records, sorted by category, package name and version.
    fn sorted_packages(&self) -> &[PackageRecord];
}

/// An ebuild repository loaded into memory.
#[derive(Debug)]
pub struct Repository {
    name: String,
    location: PathBuf,
    packages: Vec<PackageRecord>,
}

impl Repository {
    /// Open the repository at `location` and load its metadata cache.
    ///
    /// Fails unless `profiles/repo_name` names `expected_name`.
    pub fn open(location: &Path, expected_name: &str) -> Result<Self> {
        let name_path = location.join("profiles").join("repo_name");
        if !name_path.is_file() {
            return Err(ImplsError::RepositoryNotFound {
                path: location.to_path_buf(),
            });
        }
        let name = fs::read_to_string(&name_path)
            .with_context(|| format!("reading {}", name_path.display()))?
            .trim()
            .to_string();
        if name != expected_name {
            return Err(ImplsError::RepositoryNameMismatch {
                expected: expected_name.to_string(),
                found: name,
            });
        }

        let cache_dir = location.join("metadata").join("md5-cache");
        if !cache_dir.is_dir() {
            return Err(ImplsError::RepositoryNotFound { path: cache_dir });
        }

        let packages = load_cache(location, &cache_dir)?;
        tracing::info!(
            "Loaded {} package versions from repository '{}'",
            packages.len(),
            name
        );

        Ok(Self::from_records(name, location.to_path_buf(), packages))
    }

    /// Build a repository from already loaded records.
    pub fn from_records(
        name: impl Into<String>,
        location: PathBuf,
        mut packages: Vec<PackageRecord>,
    ) -> Self {
        packages.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.package.cmp(&b.package))
                .then_with(|| a.version.cmp(&b.version))
        });
        Self {
            name: name.into(),
            location,
            packages,
        }
    }

    /// Repository root directory.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl PackageSource for Repository {
    fn name(&self) -> &str {
        &self.name
    }

    fn sorted_packages(&self) -> &[PackageRecord] {
        &self.packages
    }
}

fn load_cache(location: &Path, cache_dir: &Path) -> Result<Vec<PackageRecord>> {
    let mut packages = Vec::new();

    for category in sorted_entries(cache_dir)? {
        if !category.is_dir() {
            continue;
        }
        let Some(category_name) = file_name(&category) else {
            continue;
        };

        for entry in sorted_entries(&category)? {
            if !entry.is_file() {
                continue;
            }
            let Some(pf) = file_name(&entry) else {
                continue;
            };
            let content = fs::read_to_string(&entry)
                .with_context(|| format!("reading {}", entry.display()))?;
            let record = cache::parse_entry(location, &entry, &category_name, &pf, &content)?;
            tracing::trace!("Loaded {}", record.cpv());
            packages.push(record);
        }
    }

    Ok(packages)
}

/// Directory entries, skipping hidden files, in name order.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if file_name(&path).is_some_and(|n| !n.starts_with('.')) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
