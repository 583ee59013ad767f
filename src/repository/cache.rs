//! Metadata cache entry parsing.
//!
//! Each entry in `metadata/md5-cache/<category>/<PF>` is a list of
//! `KEY=value` lines generated by the package manager. Only the keys needed
//! for the report are read; everything else is ignored.

use std::collections::HashMap;
use std::path::Path;

use super::package::PackageRecord;
use super::version::Version;
use crate::error::{ImplsError, Result};

const TARGET_PREFIXES: [&str; 2] = ["python_targets_", "python_single_target_"];

/// The only USE flag assumed enabled when evaluating conditional groups.
const TEST_FLAG: &str = "test";

/// Build a record from the contents of one cache entry.
pub fn parse_entry(
    repo_location: &Path,
    entry_path: &Path,
    category: &str,
    pf: &str,
    content: &str,
) -> Result<PackageRecord> {
    let (package, version) = split_pf(pf).ok_or_else(|| ImplsError::InvalidCacheEntry {
        path: entry_path.to_path_buf(),
        message: format!("cannot split '{}' into name and version", pf),
    })?;

    let fields: HashMap<&str, &str> = content
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect();
    let field = |key: &str| fields.get(key).copied().unwrap_or("");

    let slot = match field("SLOT") {
        "" => "0",
        s => s.split('/').next().unwrap_or(s),
    };
    let eapi = match field("EAPI") {
        "" => "0",
        s => s,
    };

    let inherits = match fields.get("_eclasses_") {
        Some(eclasses) => eclasses
            .split('\t')
            .step_by(2)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect(),
        None => words(field("INHERIT")),
    };

    let path = repo_location
        .join(category)
        .join(&package)
        .join(format!("{}.ebuild", pf));

    Ok(PackageRecord {
        category: category.to_string(),
        package,
        version,
        slot: slot.to_string(),
        eapi: eapi.to_string(),
        implementations: python_targets(field("IUSE")),
        keywords: words(field("KEYWORDS")),
        inherits,
        restrict: evaluate_conditionals(field("RESTRICT")),
        properties: evaluate_conditionals(field("PROPERTIES")),
        path,
    })
}

/// Split `PF` at the last hyphen followed by a valid version.
pub fn split_pf(pf: &str) -> Option<(String, Version)> {
    pf.match_indices('-').rev().find_map(|(i, _)| {
        let (name, rest) = (&pf[..i], &pf[i + 1..]);
        if name.is_empty() {
            return None;
        }
        Version::parse(rest).ok().map(|v| (name.to_string(), v))
    })
}

fn words(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

/// Evaluate a USE-conditional token list as seen when tests are run.
///
/// `test` is taken as enabled and every other flag as disabled, so
/// `!test? ( test )` contributes nothing while `test? ( test_network )`
/// contributes `test_network`.
fn evaluate_conditionals(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    // one entry per open group: whether its contents apply
    let mut groups: Vec<bool> = Vec::new();
    let mut condition: Option<bool> = None;

    for token in s.split_whitespace() {
        let active = groups.last().copied().unwrap_or(true);
        match token {
            "(" => {
                let applies = condition.take().unwrap_or(true);
                groups.push(active && applies);
            }
            ")" => {
                groups.pop();
            }
            t if t.ends_with('?') => condition = Some(flag_enabled(&t[..t.len() - 1])),
            t if active => tokens.push(t.to_string()),
            _ => {}
        }
    }
    tokens
}

fn flag_enabled(condition: &str) -> bool {
    match condition.strip_prefix('!') {
        Some(flag) => flag != TEST_FLAG,
        None => condition == TEST_FLAG,
    }
}

fn python_targets(iuse: &str) -> Option<Vec<String>> {
    let mut impls: Vec<String> = Vec::new();
    for flag in iuse.split_whitespace() {
        let flag = flag.trim_start_matches(['+', '-']);
        let Some(name) = TARGET_PREFIXES.iter().find_map(|p| flag.strip_prefix(*p)) else {
            continue;
        };
        if !impls.iter().any(|i| i == name) {
            impls.push(name.to_string());
        }
    }
    (!impls.is_empty()).then_some(impls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ENTRY: &str = "DEFINED_PHASES=compile configure install prepare test\n\
EAPI=8\n\
IUSE=test python_targets_python3_11 python_targets_python3_12 +python_targets_python3_13\n\
KEYWORDS=~alpha amd64 ~arm64\n\
PROPERTIES=test? ( test_network )\n\
RESTRICT=!test? ( test )\n\
SLOT=0/1.2\n\
_eclasses_=distutils-r1\tabc123\tpypi\tdef456\tpython-r1\t0123\n";

    fn parse(pf: &str, content: &str) -> PackageRecord {
        parse_entry(
            Path::new("/repo"),
            Path::new("/repo/metadata/md5-cache/dev-python/x"),
            "dev-python",
            pf,
            content,
        )
        .unwrap()
    }

    #[test]
    fn parses_full_entry() {
        let r = parse("foo-bar-1.2-r1", ENTRY);
        assert_eq!(r.package, "foo-bar");
        assert_eq!(r.version.as_str(), "1.2-r1");
        assert_eq!(r.slot, "0");
        assert_eq!(r.eapi, "8");
        assert_eq!(
            r.implementations,
            Some(vec![
                "python3_11".to_string(),
                "python3_12".to_string(),
                "python3_13".to_string()
            ])
        );
        assert_eq!(r.keywords, vec!["~alpha", "amd64", "~arm64"]);
        assert_eq!(r.inherits, vec!["distutils-r1", "pypi", "python-r1"]);
        assert!(r.restrict.is_empty());
        assert_eq!(r.properties, vec!["test_network"]);
        assert_eq!(
            r.path,
            PathBuf::from("/repo/dev-python/foo-bar/foo-bar-1.2-r1.ebuild")
        );
    }

    #[test]
    fn test_conditional_restriction_is_not_a_restriction() {
        let r = parse("foo-1.0", "RESTRICT=!test? ( test ) mirror\nPROPERTIES=live\n");
        assert_eq!(r.restrict, vec!["mirror"]);
        assert!(!r.restricts("test"));
        assert_eq!(r.properties, vec!["live"]);
    }

    #[test]
    fn unconditional_test_restriction_is_kept() {
        let r = parse("foo-1.0", "RESTRICT=test strip\n");
        assert_eq!(r.restrict, vec!["test", "strip"]);
    }

    #[test]
    fn groups_on_other_flags_are_dropped() {
        let r = parse(
            "foo-1.0",
            "RESTRICT=doc? ( bindist ) !doc? ( mirror ) test? ( x? ( fetch ) strip )\n",
        );
        assert_eq!(r.restrict, vec!["mirror", "strip"]);
    }

    #[test]
    fn missing_targets_mean_no_python() {
        let r = parse("zlib-1.3", "EAPI=8\nIUSE=static-libs\nSLOT=0\n");
        assert_eq!(r.implementations, None);
    }

    #[test]
    fn single_target_flags_are_recognised() {
        let r = parse(
            "tool-2",
            "IUSE=python_single_target_python3_12 python_single_target_pypy3_11\n",
        );
        assert_eq!(
            r.implementations,
            Some(vec!["python3_12".to_string(), "pypy3_11".to_string()])
        );
    }

    #[test]
    fn defaults_apply_to_missing_keys() {
        let r = parse("thing-0.1", "INHERIT=cmake\n");
        assert_eq!(r.eapi, "0");
        assert_eq!(r.slot, "0");
        assert_eq!(r.inherits, vec!["cmake"]);
        assert!(r.keywords.is_empty());
    }

    #[test]
    fn split_pf_handles_hyphenated_names() {
        let (name, version) = split_pf("python-dateutil-2.9.0_p0-r1").unwrap();
        assert_eq!(name, "python-dateutil");
        assert_eq!(version.as_str(), "2.9.0_p0-r1");
        assert!(split_pf("noversion").is_none());
        assert!(split_pf("-1.0").is_none());
    }

    #[test]
    fn unsplittable_pf_is_an_error() {
        let err = parse_entry(
            Path::new("/repo"),
            Path::new("/repo/metadata/md5-cache/x/broken"),
            "x",
            "broken",
            "",
        )
        .unwrap_err();
        assert!(matches!(err, ImplsError::InvalidCacheEntry { .. }));
    }
}
