//! Report line formatting.

use super::scan::GroupSummary;
use super::theme::ReportTheme;

/// Column width of the slotted atom.
pub const ATOM_WIDTH: usize = 40;

/// Format one report line.
///
/// Implementations already listed as stable are not repeated under `~ARCH`,
/// and suggestions already listed under either are not repeated under `UP`.
/// Atoms longer than [`ATOM_WIDTH`] are kept whole.
pub fn format_line(summary: &GroupSummary, theme: &ReportTheme) -> String {
    let mut out = vec![
        format!("{:<width$}", summary.slotted_atom, width = ATOM_WIDTH),
        "EAPI:".to_string(),
        theme.eapi.apply_to(&summary.eapi),
        theme.build.apply_to(summary.flags.build.label()),
        theme.flags.apply_to(&summary.flags.codes()),
    ];

    if !summary.stable.is_empty() {
        out.push(" STABLE:".to_string());
        out.extend(summary.stable.iter().map(|i| theme.stable.apply_to(i)));
    }

    let keyworded: Vec<&String> = summary
        .keyworded
        .iter()
        .filter(|i| !summary.stable.contains(i))
        .collect();
    if !keyworded.is_empty() {
        out.push("  ~ARCH:".to_string());
        out.extend(keyworded.iter().map(|i| theme.keyworded.apply_to(i)));
    }

    let updates: Vec<&String> = summary
        .updates
        .iter()
        .filter(|i| !keyworded.contains(i) && !summary.stable.contains(i))
        .collect();
    if !updates.is_empty() {
        out.push("  UP:".to_string());
        out.extend(updates.iter().map(|i| theme.updates.apply_to(i)));
    }

    out.join(" ")
}
