//! Shared types for the module-ref workspace.
//!
//! This crate provides the normalized class descriptor model that the resolution engine
//! consumes and that the extractor produces, so neither side depends on the other.
//!
//! ## Descriptor Model
//!
//! The [`descriptor`] module contains the per-class facts used during resolution:
//! - [`ClassDescriptor`](descriptor::ClassDescriptor) - one compiled class and its members
//! - [`MethodDescriptor`](descriptor::MethodDescriptor) - a method and the symbols its body references
//! - [`MemberRef`](descriptor::MemberRef) - a symbolic `(owner, name, descriptor)` reference
//!
//! ## Names
//!
//! The [`names`] module converts between internal (`java/lang/String`) and dotted
//! (`java.lang.String`) class names and unwraps type descriptors (`[Ljava/lang/String;`).

pub mod descriptor;
pub mod env_utils;
pub mod names;

pub use descriptor::{
    ClassDescriptor, FieldDescriptor, MemberKind, MemberRef, MethodDescriptor, XmlReference,
};
pub use names::{member_signature, referenced_class, to_dotted, to_internal};

/// Identifier of one build artifact (a dependency coordinate or a baseline jar name).
pub type ModuleId = String;

/// Module id carried by classes of the Android platform jar.
pub const ANDROID_MODULE: &str = "android.jar";

/// Module id carried by classes of the Java runtime jar.
pub const JAVA_MODULE: &str = "rt.jar";

/// Baseline module ids that never appear as the target of a dependency edge.
pub const RESERVED_BASELINE_MODULES: [&str; 2] = [ANDROID_MODULE, JAVA_MODULE];

/// Check if a module id is one of the reserved baseline ids.
pub fn is_reserved_baseline(module: &str) -> bool {
    RESERVED_BASELINE_MODULES.contains(&module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_baseline_modules() {
        assert!(is_reserved_baseline("android.jar"));
        assert!(is_reserved_baseline("rt.jar"));
        assert!(!is_reserved_baseline("com.example:core:1.0"));
        assert!(!is_reserved_baseline("android"));
    }
}
