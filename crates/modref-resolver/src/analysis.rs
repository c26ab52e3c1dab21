//! The `analyze` entry point.
//!
//! One call is one batch run:
//!
//! 1. Build the [`SymbolTable`] from baseline and subject descriptors.
//! 2. Resolve references and check abstract gaps for every subject class, in parallel.
//!    Each rayon worker folds into its own [`Recorder`]; the recorders are merged at the end.
//! 3. Fold markup references into the merged recorder.
//! 4. Freeze the result into an [`AnalysisReport`].

use std::collections::BTreeSet;
use std::time::Instant;

use modref_types::{to_internal, ClassDescriptor, ModuleId, XmlReference};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::abstract_gaps::find_abstract_gaps;
use crate::error::Result;
use crate::filter::FilterPolicy;
use crate::linkage::{record_type_reference, resolve_class_references};
use crate::recorder::Recorder;
use crate::report::AnalysisReport;
use crate::symbol_table::{SymbolTable, SymbolTableBuilder};

/// Everything one run reads. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    /// Platform/runtime classes: resolvable, never analyzed, never an edge target
    pub baseline: &'a [ClassDescriptor],
    /// Classes of the modules under analysis
    pub subjects: &'a [ClassDescriptor],
    /// Class references found in markup
    pub xml_references: &'a [XmlReference],
    pub policy: &'a FilterPolicy,
}

/// Run options chosen by the caller.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Abort on a class provided by two subject modules (otherwise keep the first)
    pub fail_on_duplicate: bool,
    /// Module ids excluded from dependency edges in addition to the reserved ones
    pub baseline_modules: BTreeSet<ModuleId>,
    /// Worker threads for the resolution phase (`None` = rayon default)
    pub threads: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            fail_on_duplicate: true,
            baseline_modules: BTreeSet::new(),
            threads: None,
        }
    }
}

/// Analyze one set of modules and return the report.
///
/// Fails only when `fail_on_duplicate` is set and two subject modules provide the same
/// class. Unresolved symbols and abstract gaps are report data.
///
/// # Example
///
/// ```
/// use modref_resolver::{analyze, AnalysisInput, AnalysisOptions, FilterPolicy};
/// use modref_types::{ClassDescriptor, MemberRef};
///
/// let baseline = vec![ClassDescriptor::new("java/lang/Object", "rt.jar")];
/// let subjects = vec![
///     ClassDescriptor::new("lib/Util", "lib")
///         .with_super("java/lang/Object")
///         .with_method("help", "()V", vec![]),
///     ClassDescriptor::new("app/Main", "app")
///         .with_super("java/lang/Object")
///         .with_method("main", "()V", vec![
///             MemberRef::method("lib/Util", "help", "()V"),
///             MemberRef::method("lib/Util", "gone", "()V"),
///         ]),
/// ];
/// let policy = FilterPolicy::allow_all();
/// let input = AnalysisInput {
///     baseline: &baseline,
///     subjects: &subjects,
///     xml_references: &[],
///     policy: &policy,
/// };
///
/// let report = analyze(input, &AnalysisOptions::default()).unwrap();
/// assert_eq!(report.dependency_edges(), vec![("app", "lib")]);
/// assert!(report.module("app").unwrap().unresolved_methods.contains("lib.Util.gone(()V)"));
/// ```
pub fn analyze(input: AnalysisInput<'_>, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let start = Instant::now();

    let mut builder = SymbolTableBuilder::new(options.fail_on_duplicate)
        .with_baseline_modules(options.baseline_modules.iter().cloned());
    for desc in input.baseline {
        builder.add_baseline(desc);
    }
    for desc in input.subjects {
        builder.add_subject(desc)?;
    }
    let (table, duplicates) = builder.build();
    debug!(
        classes = table.len(),
        subjects = table.subjects().len(),
        baseline_modules = table.baseline_modules().len(),
        "symbol table built"
    );

    let recorder = match options.threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| resolve_subjects(&table, input.policy)),
            Err(e) => {
                warn!(threads, error = %e, "failed to build thread pool, using default");
                resolve_subjects(&table, input.policy)
            }
        },
        None => resolve_subjects(&table, input.policy),
    };
    let recorder = fold_xml_references(&table, input.xml_references, recorder);

    let report = AnalysisReport::new(recorder.into_modules(), duplicates);
    let totals = report.totals();
    info!(
        classes = table.len(),
        subjects = table.subjects().len(),
        modules = totals.modules,
        edges = totals.dependency_edges,
        unresolved = totals.unresolved_classes + totals.unresolved_fields + totals.unresolved_methods,
        abstract_gaps = totals.abstract_gaps,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis complete"
    );
    Ok(report)
}

fn resolve_subjects<'p>(table: &'p SymbolTable<'_>, policy: &'p FilterPolicy) -> Recorder<'p> {
    let blacklist = table.baseline_modules();
    table
        .subjects()
        .par_iter()
        .fold(
            || Recorder::new(policy, blacklist),
            |mut recorder, &class| {
                resolve_class_references(table, class, &mut recorder);
                for gap in find_abstract_gaps(table, class) {
                    recorder.record_abstract_gap(&class.owning_module, gap.signature());
                }
                recorder
            },
        )
        .reduce(|| Recorder::new(policy, blacklist), Recorder::merge)
}

/// Fold markup references into `recorder` as direct class references of their module.
///
/// Folding the same references twice yields the same recorder contents.
pub fn fold_xml_references<'p>(
    table: &SymbolTable<'_>,
    references: &[XmlReference],
    mut recorder: Recorder<'p>,
) -> Recorder<'p> {
    for reference in references {
        let name = to_internal(&reference.class_name);
        record_type_reference(table, &reference.module, &name, &mut recorder);
    }
    recorder
}
