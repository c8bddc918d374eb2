//! Human-readable diagnostics for an analysis

use std::fmt::Write as _;

use crate::{analysis::AnalysisResult, merge::MergeMode};

/// Render the diagnostics block printed by `streamline --check`
pub fn render_report(analysis: &AnalysisResult, file_count: usize, mode: MergeMode) -> String {
    let summary = analysis.summary(file_count);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} files, {} unique imports, {} declarations, {} conflicts",
        summary.files, summary.imports, summary.declarations, summary.conflicts
    );

    if !analysis.imports.is_empty() {
        out.push_str("\nImports:\n");
        for import in &analysis.imports {
            let _ = writeln!(out, "  [{}] {}", import.origin, import.raw);
        }
    }

    out.push_str("\nDiagnostics:\n");
    if analysis.conflicts.is_empty() {
        out.push_str("  no conflicts detected\n");
    }
    for conflict in &analysis.conflicts {
        let _ = writeln!(out, "  {conflict}");
    }
    for warning in &analysis.warnings {
        let _ = writeln!(out, "  note: {warning}");
    }

    let verdict = if mode.permits(analysis) {
        "allowed"
    } else {
        "blocked by entry-point collision"
    };
    let _ = writeln!(out, "\nMerge ({mode}): {verdict}");
    out
}
