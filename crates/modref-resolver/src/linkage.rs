//! # Linkage Resolution
//!
//! Resolves the symbolic references of one subject class against the [`SymbolTable`] and
//! feeds the outcome to a [`Recorder`].
//!
//! ## Type References
//!
//! Superclass, interfaces, annotation types and field types name a class directly. A known
//! class yields a dependency edge to its module; an unknown one an unresolved class.
//!
//! ## Member References
//!
//! Method calls and field accesses are looked up the way the VM links them:
//!
//! | Stage | Searched | Stops on |
//! |-------|----------|----------|
//! | [`Owner`](LookupStage::Owner) | the owner's own members | exact `(name, descriptor)` match |
//! | [`Superclass`](LookupStage::Superclass) | the owner's superclass chain, nearest first | first match, missing or cyclic ancestor |
//! | [`Interface`](LookupStage::Interface) | the owner's interface closure, depth-first | first match |
//!
//! The dependency edge points at the module of the *declaring* class, which may differ
//! from the owner's module when the member is inherited.

use modref_types::{referenced_class, ClassDescriptor, MemberKind, MemberRef};
use tracing::debug;

use crate::hierarchy::{interface_closure, superclass_chain, ChainEnd};
use crate::recorder::Recorder;
use crate::symbol_table::SymbolTable;

/// Where a member lookup found its declaring class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    Owner,
    Superclass,
    Interface,
}

/// Outcome of a member lookup starting at a known owner class.
#[derive(Debug, Clone)]
pub struct MemberLookup<'a> {
    /// Declaring class and the stage that found it, if any.
    pub declaring: Option<(&'a ClassDescriptor, LookupStage)>,
    /// Ancestor missing from the table that cut the superclass walk short.
    pub missing_ancestor: Option<&'a str>,
}

/// Look up `(name, descriptor)` of the given kind starting at `owner`.
pub fn resolve_member<'a>(
    table: &SymbolTable<'a>,
    owner: &'a ClassDescriptor,
    kind: MemberKind,
    name: &str,
    descriptor: &str,
) -> MemberLookup<'a> {
    if owner.declares(kind, name, descriptor) {
        return MemberLookup {
            declaring: Some((owner, LookupStage::Owner)),
            missing_ancestor: None,
        };
    }

    let chain = superclass_chain(table, owner);
    if let Some(ancestor) = chain
        .ancestors
        .iter()
        .find(|ancestor| ancestor.declares(kind, name, descriptor))
    {
        return MemberLookup {
            declaring: Some((*ancestor, LookupStage::Superclass)),
            missing_ancestor: None,
        };
    }
    if let ChainEnd::Cycle(ancestor) = chain.end {
        debug!(class = %owner.name, ancestor = %ancestor, "superclass cycle");
    }

    let declaring = interface_closure(table, owner)
        .into_iter()
        .find(|iface| iface.declares(kind, name, descriptor))
        .map(|iface| (iface, LookupStage::Interface));

    MemberLookup {
        declaring,
        missing_ancestor: chain.missing(),
    }
}

/// Resolve every type and member reference made by `class`.
pub fn resolve_class_references<'a>(
    table: &SymbolTable<'a>,
    class: &'a ClassDescriptor,
    recorder: &mut Recorder<'_>,
) {
    let module = class.owning_module.as_str();

    if let Some(super_name) = class.super_name.as_deref() {
        record_type_reference(table, module, super_name, recorder);
    }
    for iface in &class.interfaces {
        record_type_reference(table, module, iface, recorder);
    }
    for annotation in &class.annotation_types {
        if let Some(name) = referenced_class(annotation) {
            record_type_reference(table, module, name, recorder);
        }
    }
    for field in &class.fields {
        if let Some(name) = referenced_class(&field.descriptor) {
            record_type_reference(table, module, name, recorder);
        }
    }

    for member in class.member_references() {
        record_member_reference(table, module, member, recorder);
    }
}

/// Record a direct reference from `module` to the class `name` (internal form).
pub(crate) fn record_type_reference(
    table: &SymbolTable<'_>,
    module: &str,
    name: &str,
    recorder: &mut Recorder<'_>,
) {
    match table.module_of(name) {
        Some(target) => recorder.record_dependency(module, target),
        None => recorder.record_unresolved_class(module, name),
    }
}

fn record_member_reference(
    table: &SymbolTable<'_>,
    module: &str,
    member: &MemberRef,
    recorder: &mut Recorder<'_>,
) {
    let Some(owner_name) = referenced_class(&member.owner) else {
        return;
    };
    let Some(owner) = table.get(owner_name) else {
        recorder.record_unresolved_class(module, owner_name);
        return;
    };

    let lookup = resolve_member(table, owner, member.kind, &member.name, &member.descriptor);
    if let Some(missing) = lookup.missing_ancestor {
        recorder.record_unresolved_class(module, missing);
    }
    match lookup.declaring {
        Some((declaring, _)) => recorder.record_dependency(module, &declaring.owning_module),
        None => recorder.record_unresolved_member(
            module,
            member.kind,
            owner_name,
            &member.name,
            &member.descriptor,
        ),
    }
}
