//! # Symbol Table
//!
//! The symbol table is the flat universe of classes a run resolves against. It maps a
//! fully-qualified internal class name to the one [`ClassDescriptor`] that provides it.
//!
//! ## Construction Order
//!
//! | Step | Input | Collision handling |
//! |------|-------|--------------------|
//! | 1 | Baseline descriptors (platform/runtime jars) | Later entry replaces earlier |
//! | 2 | Subject descriptors (modules under analysis) | Against baseline: subject replaces it. Against another subject: fail or keep first |
//!
//! The table borrows the descriptors it indexes and is never mutated after
//! [`SymbolTableBuilder::build`], so it can be shared freely across worker threads.

use std::collections::{BTreeSet, HashMap};

use modref_types::{
    is_reserved_baseline, to_dotted, ClassDescriptor, ModuleId, RESERVED_BASELINE_MODULES,
};
use tracing::{debug, warn};

use crate::error::{ResolveError, Result};
use crate::report::DuplicateClass;

// =============================================================================
// SymbolTable
// =============================================================================

/// Immutable name → descriptor lookup for one analysis run.
#[derive(Debug)]
pub struct SymbolTable<'a> {
    classes: HashMap<&'a str, &'a ClassDescriptor>,
    /// Subject classes that made it into the table, in input order
    subjects: Vec<&'a ClassDescriptor>,
    /// Modules that never appear as a dependency-edge target
    baseline_modules: BTreeSet<ModuleId>,
}

impl<'a> SymbolTable<'a> {
    pub fn get(&self, name: &str) -> Option<&'a ClassDescriptor> {
        self.classes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Module that provides the named class, if the class is known.
    pub fn module_of(&self, name: &str) -> Option<&'a str> {
        self.get(name).map(|desc| desc.owning_module.as_str())
    }

    /// Subject classes to analyze (duplicates discarded under first-wins are excluded).
    pub fn subjects(&self) -> &[&'a ClassDescriptor] {
        &self.subjects
    }

    pub fn baseline_modules(&self) -> &BTreeSet<ModuleId> {
        &self.baseline_modules
    }

    pub fn is_baseline_module(&self, module: &str) -> bool {
        self.baseline_modules.contains(module)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// =============================================================================
// SymbolTableBuilder
// =============================================================================

/// Builds a [`SymbolTable`] from baseline and subject descriptors.
///
/// # Example
///
/// ```
/// use modref_resolver::symbol_table::SymbolTableBuilder;
/// use modref_types::ClassDescriptor;
///
/// let object = ClassDescriptor::new("java/lang/Object", "rt.jar");
/// let widget = ClassDescriptor::new("com/example/Widget", "app").with_super("java/lang/Object");
///
/// let mut builder = SymbolTableBuilder::new(true);
/// builder.add_baseline(&object);
/// builder.add_subject(&widget).unwrap();
/// let (table, duplicates) = builder.build();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.module_of("com/example/Widget"), Some("app"));
/// assert!(table.is_baseline_module("rt.jar"));
/// assert!(duplicates.is_empty());
/// ```
#[derive(Debug)]
pub struct SymbolTableBuilder<'a> {
    classes: HashMap<&'a str, &'a ClassDescriptor>,
    subjects: Vec<&'a ClassDescriptor>,
    subject_names: HashMap<&'a str, &'a str>,
    baseline_modules: BTreeSet<ModuleId>,
    fail_on_duplicate: bool,
    duplicates: Vec<DuplicateClass>,
}

impl<'a> SymbolTableBuilder<'a> {
    /// Create a builder. With `fail_on_duplicate`, a class provided by two subject modules
    /// aborts the build; otherwise the first one wins and the collision is recorded.
    pub fn new(fail_on_duplicate: bool) -> Self {
        Self {
            classes: HashMap::new(),
            subjects: Vec::new(),
            subject_names: HashMap::new(),
            baseline_modules: RESERVED_BASELINE_MODULES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            fail_on_duplicate,
            duplicates: Vec::new(),
        }
    }

    /// Treat additional module ids as baseline (never a dependency-edge target).
    pub fn with_baseline_modules<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = ModuleId>,
    {
        self.baseline_modules.extend(modules);
        self
    }

    /// Insert a baseline descriptor. Its module becomes a baseline module.
    pub fn add_baseline(&mut self, desc: &'a ClassDescriptor) {
        if !self.baseline_modules.contains(&desc.owning_module) {
            if !is_reserved_baseline(&desc.owning_module) {
                debug!(module = %desc.owning_module, "registering baseline module");
            }
            self.baseline_modules.insert(desc.owning_module.clone());
        }
        self.classes.insert(desc.name.as_str(), desc);
    }

    /// Insert a subject descriptor.
    ///
    /// Returns `Ok(true)` if the descriptor was added, `Ok(false)` if it was discarded as a
    /// later duplicate under first-wins, and an error under fail-on-duplicate.
    pub fn add_subject(&mut self, desc: &'a ClassDescriptor) -> Result<bool> {
        let name = desc.name.as_str();
        if let Some(first_module) = self.subject_names.get(name).copied() {
            if self.fail_on_duplicate {
                return Err(ResolveError::DuplicateClass {
                    class: to_dotted(name),
                    first_module: first_module.to_string(),
                    second_module: desc.owning_module.clone(),
                });
            }
            warn!(
                class = %to_dotted(name),
                kept = %first_module,
                discarded = %desc.owning_module,
                "duplicate class, keeping first"
            );
            self.duplicates.push(DuplicateClass {
                class: to_dotted(name),
                kept_module: first_module.to_string(),
                discarded_module: desc.owning_module.clone(),
            });
            return Ok(false);
        }

        if let Some(shadowed) = self.classes.insert(name, desc) {
            debug!(
                class = %to_dotted(name),
                baseline = %shadowed.owning_module,
                subject = %desc.owning_module,
                "subject class shadows baseline class"
            );
        }
        self.subject_names.insert(name, desc.owning_module.as_str());
        self.subjects.push(desc);
        Ok(true)
    }

    /// Finish construction. Returns the table and any first-wins duplicates.
    pub fn build(self) -> (SymbolTable<'a>, Vec<DuplicateClass>) {
        let table = SymbolTable {
            classes: self.classes,
            subjects: self.subjects,
            baseline_modules: self.baseline_modules,
        };
        (table, self.duplicates)
    }
}
