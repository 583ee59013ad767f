//! Package versions and their ordering.
//!
//! Versions follow the Package Manager Specification: dot-separated numeric
//! components, an optional letter, any number of `_alpha`/`_beta`/`_pre`/
//! `_rc`/`_p` suffixes (each with an optional number) and an optional `-rN`
//! revision.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ImplsError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)([a-z])?((?:_(?:alpha|beta|pre|rc|p)\d*)*)(?:-r(\d+))?$")
        .expect("VERSION_REGEX must compile")
});

static SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(alpha|beta|pre|rc|p)(\d*)").expect("SUFFIX_REGEX must compile")
});

/// Version suffix kind, in ascending order.
///
/// A version without suffixes sorts between [`SuffixKind::Rc`] and
/// [`SuffixKind::P`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuffixKind {
    Alpha,
    Beta,
    Pre,
    Rc,
    P,
}

impl SuffixKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "alpha" => Some(Self::Alpha),
            "beta" => Some(Self::Beta),
            "pre" => Some(Self::Pre),
            "rc" => Some(Self::Rc),
            "p" => Some(Self::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Suffix {
    kind: SuffixKind,
    number: String,
}

/// A parsed package version.
///
/// Displays as the string it was parsed from, so `foo-1.0-r1` round-trips
/// into lookup keys unchanged.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<String>,
    letter: Option<char>,
    suffixes: Vec<Suffix>,
    revision: String,
}

impl Version {
    /// Parse a version string.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ImplsError::InvalidVersion {
            version: s.to_string(),
        };
        let caps = VERSION_REGEX.captures(s).ok_or_else(invalid)?;

        let components = caps[1].split('.').map(str::to_string).collect();
        let letter = caps.get(2).and_then(|m| m.as_str().chars().next());
        let suffixes = SUFFIX_REGEX
            .captures_iter(caps.get(3).map_or("", |m| m.as_str()))
            .map(|c| -> Result<Suffix> {
                let kind = SuffixKind::parse(&c[1]).ok_or_else(invalid)?;
                Ok(Suffix {
                    kind,
                    number: c[2].to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let revision = caps
            .get(4)
            .map_or_else(String::new, |m| m.as_str().to_string());

        Ok(Self {
            raw: s.to_string(),
            components,
            letter,
            suffixes,
            revision,
        })
    }

    /// The version string as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Compare two digit strings as arbitrarily large integers.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_components(a: &[String], b: &[String]) -> Ordering {
    let mut pairs = a.iter().zip(b.iter());
    if let Some((x, y)) = pairs.next() {
        let ord = cmp_numeric(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    for (x, y) in pairs {
        // leading zero means fractional comparison
        let ord = if x.starts_with('0') || y.starts_with('0') {
            x.trim_end_matches('0').cmp(y.trim_end_matches('0'))
        } else {
            cmp_numeric(x, y)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn cmp_suffixes(a: &[Suffix], b: &[Suffix]) -> Ordering {
    for i in 0..a.len().max(b.len()) {
        let ord = match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => x
                .kind
                .cmp(&y.kind)
                .then_with(|| cmp_numeric(&x.number, &y.number)),
            (Some(x), None) if x.kind == SuffixKind::P => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, Some(y)) if y.kind == SuffixKind::P => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_components(&self.components, &other.components)
            .then_with(|| self.letter.cmp(&other.letter))
            .then_with(|| cmp_suffixes(&self.suffixes, &other.suffixes))
            .then_with(|| cmp_numeric(&self.revision, &other.revision))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = ImplsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
