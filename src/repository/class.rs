//! Keyword classification of package versions.

/// Release channel of a package version, derived from its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageClass {
    /// No keywords at all (live ebuilds, masked snapshots).
    NonKeyworded,
    /// Only testing (`~arch`) keywords.
    Keyworded,
    /// At least one stable keyword.
    Stable,
}

/// Classify a version by its `KEYWORDS`.
///
/// `-arch` and `-*` entries remove support rather than add it and are
/// ignored.
pub fn classify<S: AsRef<str>>(keywords: &[S]) -> PackageClass {
    let mut class = PackageClass::NonKeyworded;
    for keyword in keywords.iter().map(AsRef::as_ref) {
        if keyword.is_empty() || keyword.starts_with('-') || keyword == "*" {
            continue;
        }
        if keyword.starts_with('~') {
            class = PackageClass::Keyworded;
        } else {
            return PackageClass::Stable;
        }
    }
    class
}
