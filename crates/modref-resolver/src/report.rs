//! # Analysis Report
//!
//! The immutable result of one [`analyze`](crate::analyze) run.
//!
//! | Bucket | Contents | Key format |
//! |--------|----------|------------|
//! | `dependencies` | Modules this module links against | module id |
//! | `unresolved_classes` | Classes referenced but not found | `com.example.Widget` |
//! | `unresolved_fields` | Field accesses with no declaring class | `com.example.Widget.size(I)` |
//! | `unresolved_methods` | Method calls with no declaring class | `com.example.Widget.draw(()V)` |
//! | `abstract_gaps` | Inherited abstract methods a concrete class does not implement | `com.example.Shape.area(()D)` |
//!
//! Every collection is ordered (`BTreeMap`/`BTreeSet`), so iteration and serialization are
//! deterministic for a fixed input regardless of worker scheduling.

use std::collections::{BTreeMap, BTreeSet};

use modref_types::ModuleId;
use serde::Serialize;

/// A class provided by two subject modules, resolved under first-wins policy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DuplicateClass {
    /// Dotted class name
    pub class: String,
    pub kept_module: ModuleId,
    pub discarded_module: ModuleId,
}

/// Findings attributed to one referencing module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub dependencies: BTreeSet<ModuleId>,
    pub unresolved_classes: BTreeSet<String>,
    pub unresolved_fields: BTreeSet<String>,
    pub unresolved_methods: BTreeSet<String>,
    pub abstract_gaps: BTreeSet<String>,
}

impl ModuleReport {
    /// Whether this module has any unresolved record or abstract gap.
    pub fn has_problems(&self) -> bool {
        !(self.unresolved_classes.is_empty()
            && self.unresolved_fields.is_empty()
            && self.unresolved_methods.is_empty()
            && self.abstract_gaps.is_empty())
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved_classes.len() + self.unresolved_fields.len() + self.unresolved_methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && !self.has_problems()
    }

    /// Union `other` into `self`.
    pub(crate) fn absorb(&mut self, other: ModuleReport) {
        self.dependencies.extend(other.dependencies);
        self.unresolved_classes.extend(other.unresolved_classes);
        self.unresolved_fields.extend(other.unresolved_fields);
        self.unresolved_methods.extend(other.unresolved_methods);
        self.abstract_gaps.extend(other.abstract_gaps);
    }
}

/// Aggregate counts over a whole report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub modules: usize,
    pub dependency_edges: usize,
    pub unresolved_classes: usize,
    pub unresolved_fields: usize,
    pub unresolved_methods: usize,
    pub abstract_gaps: usize,
    pub duplicate_classes: usize,
}

/// Per-module findings of one analysis run.
///
/// Only modules with at least one record appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    modules: BTreeMap<ModuleId, ModuleReport>,
    duplicate_classes: Vec<DuplicateClass>,
}

impl AnalysisReport {
    pub(crate) fn new(
        modules: BTreeMap<ModuleId, ModuleReport>,
        mut duplicate_classes: Vec<DuplicateClass>,
    ) -> Self {
        duplicate_classes.sort();
        Self {
            modules,
            duplicate_classes,
        }
    }

    pub fn modules(&self) -> &BTreeMap<ModuleId, ModuleReport> {
        &self.modules
    }

    pub fn module(&self, id: &str) -> Option<&ModuleReport> {
        self.modules.get(id)
    }

    /// Classes that two subject modules both provided (first-wins policy only).
    pub fn duplicate_classes(&self) -> &[DuplicateClass] {
        &self.duplicate_classes
    }

    /// All dependency edges as sorted `(source, target)` pairs.
    pub fn dependency_edges(&self) -> Vec<(&str, &str)> {
        self.modules
            .iter()
            .flat_map(|(source, report)| {
                report
                    .dependencies
                    .iter()
                    .map(move |target| (source.as_str(), target.as_str()))
            })
            .collect()
    }

    /// True when no module has an unresolved record or abstract gap.
    pub fn is_clean(&self) -> bool {
        !self.modules.values().any(ModuleReport::has_problems)
    }

    pub fn totals(&self) -> ReportTotals {
        let mut totals = ReportTotals {
            modules: self.modules.len(),
            duplicate_classes: self.duplicate_classes.len(),
            ..Default::default()
        };
        for report in self.modules.values() {
            totals.dependency_edges += report.dependencies.len();
            totals.unresolved_classes += report.unresolved_classes.len();
            totals.unresolved_fields += report.unresolved_fields.len();
            totals.unresolved_methods += report.unresolved_methods.len();
            totals.abstract_gaps += report.abstract_gaps.len();
        }
        totals
    }
}
