//! Per-group scan.

use crate::compat::CompatUpdates;
use crate::error::Result;
use crate::implementations::ImplementationRegistry;
use crate::repository::{PackageClass, PackageRecord};

use super::flags::{derive_flags, PresentationFlags};

/// What the report knows about one slotted package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// `category/package:slot`.
    pub slotted_atom: String,
    /// EAPI of the newest Python version.
    pub eapi: String,
    pub flags: PresentationFlags,
    /// Short names declared by the newest stable version.
    pub stable: Vec<String>,
    /// Short names declared by the newest keyworded version.
    pub keyworded: Vec<String>,
    /// Short names suggested by pkgcheck for the newest version that has
    /// suggestions.
    pub updates: Vec<String>,
}

/// Scan one group of versions of a slotted package, oldest first.
///
/// Versions are visited newest first. The first version that does not use
/// Python ends the scan: anything older is assumed to predate the Python
/// port. Returns `None` when no keyworded or stable Python version was found.
pub fn scan_group(
    group: &[PackageRecord],
    registry: &ImplementationRegistry,
    compat: &CompatUpdates,
) -> Result<Option<GroupSummary>> {
    let Some(first) = group.first() else {
        return Ok(None);
    };

    let mut keyworded: Vec<String> = Vec::new();
    let mut stable: Vec<String> = Vec::new();
    let mut updates: Vec<String> = Vec::new();
    let mut eapi: Option<String> = None;
    let mut flags: Option<PresentationFlags> = None;

    for record in group.iter().rev() {
        let Some(declared) = &record.implementations else {
            tracing::trace!("{} does not use Python, stopping", record.cpv());
            break;
        };
        let impls = short_names(declared, registry);
        let class = record.class();

        if eapi.is_none() {
            eapi = Some(record.eapi.clone());
        }
        if keyworded.is_empty() && class != PackageClass::NonKeyworded {
            keyworded = impls.clone();
        }
        if stable.is_empty() && class == PackageClass::Stable {
            stable = impls;
        }
        if updates.is_empty() {
            updates = compat
                .get(&record.cpv())
                .iter()
                .map(|name| registry.short_name(name).map(str::to_string))
                .collect::<Result<_>>()?;
        }
        if flags.is_none() {
            flags = Some(derive_flags(record)?);
        }

        if !keyworded.is_empty() && !stable.is_empty() {
            break;
        }
    }

    if keyworded.is_empty() && stable.is_empty() {
        return Ok(None);
    }
    let (Some(eapi), Some(flags)) = (eapi, flags) else {
        unreachable!("eapi and flags are set by the first Python version visited");
    };

    Ok(Some(GroupSummary {
        slotted_atom: first.slotted_atom(),
        eapi,
        flags,
        stable,
        keyworded,
        updates,
    }))
}

/// Resolve declared names, dropping the ones the registry does not know.
fn short_names(declared: &[String], registry: &ImplementationRegistry) -> Vec<String> {
    declared
        .iter()
        .filter_map(|name| match registry.short_name(name) {
            Ok(short) => Some(short.to_string()),
            Err(_) => {
                tracing::warn!("Skipping unknown implementation '{}'", name);
                None
            }
        })
        .collect()
}
