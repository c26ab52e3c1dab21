//! Type hierarchy walks over a [`SymbolTable`].
//!
//! Both walks are bounded: every class is visited at most once, so malformed input with
//! an inheritance cycle terminates instead of looping.

use std::collections::HashSet;

use modref_types::ClassDescriptor;

use crate::symbol_table::SymbolTable;

/// Why a superclass walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd<'a> {
    /// The last ancestor has no superclass (the universal root type).
    Root,
    /// The named ancestor is not part of the known universe.
    Missing(&'a str),
    /// The named ancestor was already visited (malformed input).
    Cycle(&'a str),
}

/// Superclasses of a class, nearest first, plus the reason the walk stopped.
#[derive(Debug, Clone)]
pub struct AncestorChain<'a> {
    pub ancestors: Vec<&'a ClassDescriptor>,
    pub end: ChainEnd<'a>,
}

impl<'a> AncestorChain<'a> {
    /// Name of the ancestor missing from the table, if the walk stopped on one.
    pub fn missing(&self) -> Option<&'a str> {
        match self.end {
            ChainEnd::Missing(name) => Some(name),
            _ => None,
        }
    }
}

/// Walk the single-inheritance superclass chain of `class`.
///
/// `class` itself is not part of the result.
pub fn superclass_chain<'a>(
    table: &SymbolTable<'a>,
    class: &'a ClassDescriptor,
) -> AncestorChain<'a> {
    let mut ancestors = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(class.name.as_str());

    let mut next = class.super_name.as_deref();
    let end = loop {
        let Some(name) = next else {
            break ChainEnd::Root;
        };
        if !visited.insert(name) {
            break ChainEnd::Cycle(name);
        }
        let Some(ancestor) = table.get(name) else {
            break ChainEnd::Missing(name);
        };
        ancestors.push(ancestor);
        next = ancestor.super_name.as_deref();
    };

    AncestorChain { ancestors, end }
}

/// Transitive interfaces of `class`, depth-first in declaration order.
///
/// Each interface is listed once, at its first pre-order position. Interfaces missing
/// from the table are skipped (their own superinterfaces are unknown).
pub fn interface_closure<'a>(
    table: &SymbolTable<'a>,
    class: &'a ClassDescriptor,
) -> Vec<&'a ClassDescriptor> {
    let mut closure = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    // Explicit stack of pending interface names; pushed in reverse to keep declaration order.
    let mut stack: Vec<&'a str> = class.interfaces.iter().rev().map(String::as_str).collect();

    while let Some(name) = stack.pop() {
        if !visited.insert(name) {
            continue;
        }
        if let Some(iface) = table.get(name) {
            closure.push(iface);
            stack.extend(iface.interfaces.iter().rev().map(String::as_str));
        }
    }

    closure
}
