//! Abstract-method gap checker.
//!
//! For a concrete class `C` the checker replays its abstract ancestors, from the most-base
//! one down to `C`, carrying a residual set of abstract requirements keyed by
//! `(name, descriptor)`. Concrete ancestors are not levels and contribute nothing.
//!
//! 1. Each level adds its interface closure's abstract methods, minus those that a default
//!    method in the same closure already provides, plus its own abstract methods.
//! 2. Each level then removes the requirements matched by its own non-abstract methods.
//!
//! Whatever survives `C` is a gap: calling it on an instance of `C` would fail with an
//! abstract-method error at run time. A requirement that two interfaces both declare is one
//! entry, so a single override satisfies it.

use std::collections::{BTreeMap, HashSet};

use modref_types::{member_signature, ClassDescriptor};

use crate::hierarchy::{interface_closure, superclass_chain};
use crate::symbol_table::SymbolTable;

/// An inherited abstract method that a concrete class does not implement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AbstractGap<'a> {
    /// Class or interface that introduced the requirement
    pub declaring_class: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

impl AbstractGap<'_> {
    /// Report form: `com.example.Shape.area(()D)`.
    pub fn signature(&self) -> String {
        member_signature(self.declaring_class, self.name, self.descriptor)
    }
}

type Requirements<'a> = BTreeMap<(&'a str, &'a str), &'a str>;

/// Compute the abstract gaps of `class`, sorted by `(name, descriptor)`.
///
/// Abstract classes and interfaces never have gaps.
pub fn find_abstract_gaps<'a>(
    table: &SymbolTable<'a>,
    class: &'a ClassDescriptor,
) -> Vec<AbstractGap<'a>> {
    if !class.is_concrete() {
        return Vec::new();
    }

    // A missing ancestor ends the chain; everything above it is unknown.
    let chain = superclass_chain(table, class);
    let levels = chain
        .ancestors
        .iter()
        .rev()
        .copied()
        .filter(|ancestor| ancestor.is_abstract)
        .chain(std::iter::once(class));

    let mut residual: Requirements<'a> = BTreeMap::new();
    for level in levels {
        add_requirements(table, level, &mut residual);
        for method in level.concrete_methods() {
            residual.remove(&(method.name.as_str(), method.descriptor.as_str()));
        }
    }

    residual
        .into_iter()
        .map(|((name, descriptor), declaring_class)| AbstractGap {
            declaring_class,
            name,
            descriptor,
        })
        .collect()
}

fn add_requirements<'a>(
    table: &SymbolTable<'a>,
    level: &'a ClassDescriptor,
    residual: &mut Requirements<'a>,
) {
    let closure = interface_closure(table, level);

    let defaults: HashSet<(&str, &str)> = closure
        .iter()
        .flat_map(|iface| iface.concrete_methods())
        .map(|m| (m.name.as_str(), m.descriptor.as_str()))
        .collect();

    for iface in &closure {
        for method in iface.abstract_methods() {
            let key = (method.name.as_str(), method.descriptor.as_str());
            if !defaults.contains(&key) {
                residual.entry(key).or_insert(iface.name.as_str());
            }
        }
    }

    for method in level.abstract_methods() {
        residual
            .entry((method.name.as_str(), method.descriptor.as_str()))
            .or_insert(level.name.as_str());
    }
}
