//! Output formatting for module-ref CLI
//!
//! Human-readable and JSON summaries of an analysis report.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use module_ref::output::{abs_method_map, module_ref_map, ModuleRefEntry};
use modref_resolver::{AnalysisReport, DuplicateClass, ReportTotals};

/// JSON printed by `analyze --json` when no output directory is given.
#[derive(Debug, Serialize)]
pub struct AnalyzeJson<'a> {
    pub totals: ReportTotals,
    pub modules: BTreeMap<&'a str, ModuleRefEntry<'a>>,
    pub abstract_gaps: BTreeMap<&'a str, &'a BTreeSet<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicate_classes: Vec<DuplicateClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub written: Vec<PathBuf>,
}

impl<'a> AnalyzeJson<'a> {
    pub fn new(report: &'a AnalysisReport, written: Vec<PathBuf>) -> Self {
        Self {
            totals: report.totals(),
            modules: module_ref_map(report),
            abstract_gaps: abs_method_map(report),
            duplicate_classes: report.duplicate_classes().to_vec(),
            written,
        }
    }
}

/// Format a report for the terminal.
pub fn format_report(report: &AnalysisReport, verbose: bool) -> String {
    let mut out = String::new();
    let totals = report.totals();

    if report.is_clean() {
        out.push_str("\x1b[32m✓ No linkage problems found\x1b[0m\n\n");
    } else {
        out.push_str(&format!(
            "\x1b[31m✗ {} unresolved symbol(s), {} abstract gap(s)\x1b[0m\n\n",
            totals.unresolved_classes + totals.unresolved_fields + totals.unresolved_methods,
            totals.abstract_gaps
        ));
    }

    out.push_str(&format!(
        "Modules: {}  Edges: {}  Classes: {}  Fields: {}  Methods: {}  Gaps: {}\n",
        totals.modules,
        totals.dependency_edges,
        totals.unresolved_classes,
        totals.unresolved_fields,
        totals.unresolved_methods,
        totals.abstract_gaps
    ));

    for duplicate in report.duplicate_classes() {
        out.push_str(&format!(
            "\x1b[33mDuplicate class {} (kept {}, discarded {})\x1b[0m\n",
            duplicate.class, duplicate.kept_module, duplicate.discarded_module
        ));
    }

    for (module, findings) in report.modules() {
        if !findings.has_problems() && !verbose {
            continue;
        }
        out.push_str(&format!("\n\x1b[1m{}\x1b[0m\n", module));
        if verbose && !findings.dependencies.is_empty() {
            let deps: Vec<&str> = findings.dependencies.iter().map(String::as_str).collect();
            out.push_str(&format!("  depends on: {}\n", deps.join(", ")));
        }
        push_section(&mut out, "missing class", &findings.unresolved_classes);
        push_section(&mut out, "missing field", &findings.unresolved_fields);
        push_section(&mut out, "missing method", &findings.unresolved_methods);
        push_section(&mut out, "abstract gap", &findings.abstract_gaps);
    }

    out
}

fn push_section(out: &mut String, label: &str, entries: &BTreeSet<String>) {
    for entry in entries {
        out.push_str(&format!("  {}: {}\n", label, entry));
    }
}
