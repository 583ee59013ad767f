//! Implementation report.
//!
//! Packages are grouped by slotted atom; each group is scanned newest version
//! first and summarised on one line.
//!
//! # Architecture
//!
//! - [`flags`] - Presentation flags scraped from ebuilds
//! - [`format`] - Report line formatting
//! - [`scan`] - Per-group scan
//! - [`theme`] - mIRC colouring

pub mod flags;
pub mod format;
pub mod scan;
pub mod theme;

use std::io::Write;

use crate::compat::CompatUpdates;
use crate::error::Result;
use crate::implementations::ImplementationRegistry;
use crate::repository::{group_by_key, PackageSource};

pub use flags::{derive_flags, Attestation, BuildType, PresentationFlags, TestMode};
pub use format::{format_line, ATOM_WIDTH};
pub use scan::{scan_group, GroupSummary};
pub use theme::{MircColor, ReportTheme};

/// Counts from a report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    /// Slotted packages examined.
    pub groups: usize,
    /// Lines written.
    pub reported: usize,
}

/// Write the report for every slotted package in `source` to `out`.
pub fn report<S, W>(
    source: &S,
    registry: &ImplementationRegistry,
    compat: &CompatUpdates,
    theme: &ReportTheme,
    out: &mut W,
) -> Result<ReportStats>
where
    S: PackageSource + ?Sized,
    W: Write + ?Sized,
{
    let mut stats = ReportStats::default();

    for group in group_by_key(source.sorted_packages(), |p| p.slotted_atom()) {
        stats.groups += 1;
        match scan_group(group, registry, compat)? {
            Some(summary) => {
                writeln!(out, "{}", format_line(&summary, theme))?;
                stats.reported += 1;
            }
            None => {
                if let Some(first) = group.first() {
                    tracing::debug!(
                        "Skipping {}: no keyworded Python versions",
                        first.slotted_atom()
                    );
                }
            }
        }
    }
    out.flush()?;

    tracing::info!(
        "Reported {} of {} packages in '{}'",
        stats.reported,
        stats.groups,
        source.name()
    );
    Ok(stats)
}
