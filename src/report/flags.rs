//! Presentation flags scraped from ebuilds.
//!
//! The ebuild is scanned line by line for a handful of well-known
//! assignments and calls. This is a prefix match, not a bash parser:
//! indented or conditional assignments are not seen.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::Context;

use crate::error::Result;
use crate::repository::PackageRecord;

const DISTUTILS_ECLASS: &str = "distutils-r1";
const PYPI_ECLASS: &str = "pypi";

const PEP517_PREFIX: &str = "DISTUTILS_USE_PEP517=";
const VERIFY_REPO_PREFIX: &str = "PYPI_VERIFY_REPO=";
const TEST_PREFIXES: [&str; 2] = ["distutils_enable_tests ", "python_test()"];

/// Build system generation used by a distutils-r1 package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    /// Not a distutils-r1 package.
    NotApplicable,
    #[default]
    Legacy,
    Pep517,
}

impl BuildType {
    /// Fixed-width label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotApplicable => "        ",
            Self::Legacy => "(legacy)",
            Self::Pep517 => "(PEP517)",
        }
    }
}

/// Whether PyPI provenance attestations are verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attestation {
    /// Not fetched from PyPI.
    NotApplicable,
    #[default]
    Unverified,
    Verified,
}

impl Attestation {
    pub fn code(self) -> char {
        match self {
            Self::NotApplicable => ' ',
            Self::Unverified => '-',
            Self::Verified => 'A',
        }
    }
}

/// How the test phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestMode {
    /// No test phase found.
    #[default]
    Unknown,
    Enabled,
    Restricted,
    /// Tests need network access.
    Network,
    /// Tests need root privileges.
    Privileged,
}

impl TestMode {
    pub fn code(self) -> char {
        match self {
            Self::Unknown => ' ',
            Self::Enabled => 'T',
            Self::Restricted => 'r',
            Self::Network => 'n',
            Self::Privileged => 'p',
        }
    }
}

/// Per-group display codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationFlags {
    pub build: BuildType,
    pub attestation: Attestation,
    pub test: TestMode,
}

impl PresentationFlags {
    /// Attestation and test codes as one two-character token.
    pub fn codes(&self) -> String {
        [self.attestation.code(), self.test.code()].iter().collect()
    }
}

/// Derive the presentation flags for a package version.
///
/// The ebuild is read only if the package inherits distutils-r1 or does not
/// restrict tests; otherwise the metadata alone decides.
pub fn derive_flags(record: &PackageRecord) -> Result<PresentationFlags> {
    let mut flags = PresentationFlags::default();

    if record.inherits(DISTUTILS_ECLASS) || !record.restricts("test") {
        let file = File::open(&record.path)
            .with_context(|| format!("opening {}", record.path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("reading {}", record.path.display()))?;
            if line.starts_with(PEP517_PREFIX) {
                flags.build = BuildType::Pep517;
            }
            if line.starts_with(VERIFY_REPO_PREFIX) {
                flags.attestation = Attestation::Verified;
            }
            if TEST_PREFIXES.iter().any(|p| line.starts_with(*p)) {
                flags.test = TestMode::Enabled;
                // nothing of interest follows the test setup
                break;
            }
        }
    }

    if record.has_property("test_network") {
        flags.test = TestMode::Network;
    } else if record.has_property("test_privileged") {
        flags.test = TestMode::Privileged;
    } else if record.restricts("test") {
        flags.test = TestMode::Restricted;
    }
    if !record.inherits(DISTUTILS_ECLASS) {
        flags.build = BuildType::NotApplicable;
    }
    if !record.inherits(PYPI_ECLASS) {
        flags.attestation = Attestation::NotApplicable;
    }

    tracing::trace!("{}: {:?}", record.cpv(), flags);
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Version;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn to_vec(s: &[&str]) -> Vec<String> {
        s.iter().map(|x| x.to_string()).collect()
    }

    fn record(
        path: PathBuf,
        inherits: &[&str],
        restrict: &[&str],
        properties: &[&str],
    ) -> PackageRecord {
        PackageRecord {
            category: "dev-python".into(),
            package: "foo".into(),
            version: Version::parse("1.0").unwrap(),
            slot: "0".into(),
            eapi: "8".into(),
            implementations: Some(vec!["python3_12".into()]),
            keywords: vec!["amd64".into()],
            inherits: to_vec(inherits),
            restrict: to_vec(restrict),
            properties: to_vec(properties),
            path,
        }
    }

    fn ebuild(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("foo-1.0.ebuild");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn pep517_pypi_package_with_tests() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(
            temp.path(),
            "EAPI=8\n\nDISTUTILS_USE_PEP517=setuptools\nPYPI_VERIFY_REPO=https://github.com/x/foo\ninherit distutils-r1 pypi\n\ndistutils_enable_tests pytest\n",
        );
        let flags = derive_flags(&record(path, &["distutils-r1", "pypi"], &[], &[])).unwrap();

        assert_eq!(flags.build, BuildType::Pep517);
        assert_eq!(flags.attestation, Attestation::Verified);
        assert_eq!(flags.test, TestMode::Enabled);
        assert_eq!(flags.codes(), "AT");
        assert_eq!(flags.build.label(), "(PEP517)");
    }

    #[test]
    fn legacy_package_without_tests() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(temp.path(), "EAPI=7\ninherit distutils-r1 pypi\n");
        let flags = derive_flags(&record(path, &["distutils-r1", "pypi"], &[], &[])).unwrap();

        assert_eq!(flags.build, BuildType::Legacy);
        assert_eq!(flags.codes(), "- ");
    }

    #[test]
    fn python_test_function_enables_tests() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(temp.path(), "inherit python-r1\n\npython_test() {\n\tepytest\n}\n");
        let flags = derive_flags(&record(path, &["python-r1"], &[], &[])).unwrap();

        assert_eq!(flags.test, TestMode::Enabled);
        assert_eq!(flags.build, BuildType::NotApplicable);
        assert_eq!(flags.build.label(), "        ");
        assert_eq!(flags.codes(), " T");
    }

    #[test]
    fn scan_stops_at_test_setup() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(
            temp.path(),
            "distutils_enable_tests pytest\nDISTUTILS_USE_PEP517=hatchling\n",
        );
        let flags = derive_flags(&record(path, &["distutils-r1"], &[], &[])).unwrap();

        assert_eq!(flags.build, BuildType::Legacy);
        assert_eq!(flags.test, TestMode::Enabled);
    }

    #[test]
    fn indented_lines_are_not_matched() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(temp.path(), "\tDISTUTILS_USE_PEP517=flit\n");
        let flags = derive_flags(&record(path, &["distutils-r1"], &[], &[])).unwrap();
        assert_eq!(flags.build, BuildType::Legacy);
    }

    #[test]
    fn network_property_overrides_test_phase() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(temp.path(), "distutils_enable_tests pytest\n");
        let flags = derive_flags(&record(
            path,
            &["distutils-r1"],
            &["test"],
            &["test_network"],
        ))
        .unwrap();
        assert_eq!(flags.test, TestMode::Network);
    }

    #[test]
    fn privileged_property_overrides_test_phase() {
        let temp = TempDir::new().unwrap();
        let path = ebuild(temp.path(), "distutils_enable_tests pytest\n");
        let flags =
            derive_flags(&record(path, &["distutils-r1"], &[], &["test_privileged"])).unwrap();
        assert_eq!(flags.test, TestMode::Privileged);
    }

    #[test]
    fn restricted_tests_skip_the_ebuild() {
        // the path does not exist: reading it would fail
        let path = PathBuf::from("/nonexistent/foo-1.0.ebuild");
        let flags = derive_flags(&record(path, &["python-single-r1"], &["test"], &[])).unwrap();

        assert_eq!(flags.test, TestMode::Restricted);
        assert_eq!(flags.build, BuildType::NotApplicable);
        assert_eq!(flags.attestation, Attestation::NotApplicable);
        assert_eq!(flags.codes(), " r");
    }

    #[test]
    fn missing_ebuild_is_an_error() {
        let path = PathBuf::from("/nonexistent/foo-1.0.ebuild");
        assert!(derive_flags(&record(path, &["distutils-r1"], &[], &[])).is_err());
    }
}
