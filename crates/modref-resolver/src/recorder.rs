//! Filtered accumulation of findings.
//!
//! A [`Recorder`] is a worker-local accumulator: every record passes through the
//! [`FilterPolicy`] gate before it lands in the referencing module's bucket. Workers never
//! share a recorder; their results are combined with [`Recorder::merge`], and since every
//! bucket is a set the merge order does not matter.

use std::collections::{BTreeMap, BTreeSet};

use modref_types::{member_signature, to_dotted, MemberKind, ModuleId};

use crate::filter::FilterPolicy;
use crate::report::ModuleReport;

pub struct Recorder<'p> {
    policy: &'p FilterPolicy,
    blacklist: &'p BTreeSet<ModuleId>,
    modules: BTreeMap<ModuleId, ModuleReport>,
}

impl<'p> Recorder<'p> {
    /// Create an empty recorder. Edges pointing into `blacklist` are never recorded.
    pub fn new(policy: &'p FilterPolicy, blacklist: &'p BTreeSet<ModuleId>) -> Self {
        Self {
            policy,
            blacklist,
            modules: BTreeMap::new(),
        }
    }

    // Buckets are created on first insert, so filtered-out modules never appear.
    fn bucket(&mut self, module: &str) -> &mut ModuleReport {
        self.modules.entry(module.to_string()).or_default()
    }

    /// Record that `source` links against `target`.
    ///
    /// Self-edges and edges into baseline modules are dropped.
    pub fn record_dependency(&mut self, source: &str, target: &str) {
        if source == target || self.blacklist.contains(target) {
            return;
        }
        if !self.policy.admits_module(source) {
            return;
        }
        self.bucket(source).dependencies.insert(target.to_string());
    }

    /// Record a class referenced by `module` that is missing from the table.
    pub fn record_unresolved_class(&mut self, module: &str, class: &str) {
        if self.policy.ignores_class(class) || !self.policy.admits_module(module) {
            return;
        }
        self.bucket(module).unresolved_classes.insert(to_dotted(class));
    }

    /// Record a member reference from `module` that no class in the hierarchy declares.
    ///
    /// The record is suppressed when either the owner class or the full signature matches
    /// an ignore pattern.
    pub fn record_unresolved_member(
        &mut self,
        module: &str,
        kind: MemberKind,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) {
        if !self.policy.admits_module(module) || self.policy.ignores_class(owner) {
            return;
        }
        let signature = member_signature(owner, name, descriptor);
        if self.policy.ignores_class(&signature) {
            return;
        }
        let bucket = self.bucket(module);
        match kind {
            MemberKind::Method => bucket.unresolved_methods.insert(signature),
            MemberKind::Field => bucket.unresolved_fields.insert(signature),
        };
    }

    /// Record an inherited abstract method that a concrete class of `module` leaves
    /// unimplemented. `signature` is already in report form.
    pub fn record_abstract_gap(&mut self, module: &str, signature: String) {
        if !self.policy.admits_module(module) {
            return;
        }
        self.bucket(module).abstract_gaps.insert(signature);
    }

    /// Fold another worker's findings into this one.
    pub fn merge(mut self, other: Recorder<'p>) -> Self {
        for (module, report) in other.modules {
            match self.modules.get_mut(&module) {
                Some(existing) => existing.absorb(report),
                None => {
                    self.modules.insert(module, report);
                }
            }
        }
        self
    }

    pub fn into_modules(self) -> BTreeMap<ModuleId, ModuleReport> {
        self.modules
    }
}
