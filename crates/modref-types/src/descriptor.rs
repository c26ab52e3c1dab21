//! Class descriptor model.
//!
//! A [`ClassDescriptor`] captures everything the resolution engine needs to know about a
//! compiled class: its place in the type hierarchy, its declared members, and the symbolic
//! references its method bodies make. Descriptors are produced by the extractor (or any
//! other collaborator) and are immutable once handed to the engine.
//!
//! All class names are in internal form (`com/example/Widget`).
//!
//! # Example
//!
//! ```
//! use modref_types::descriptor::{ClassDescriptor, MemberRef};
//!
//! let widget = ClassDescriptor::new("com/example/Widget", "app")
//!     .with_super("com/example/BaseWidget")
//!     .with_interface("java/lang/Runnable")
//!     .with_method("run", "()V", vec![MemberRef::method("com/example/Log", "d", "(Ljava/lang/String;)V")]);
//!
//! assert!(widget.is_concrete());
//! assert!(widget.declares_method("run", "()V"));
//! ```

use serde::{Deserialize, Serialize};

use crate::ModuleId;

/// One compiled class contributed by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully-qualified internal name
    pub name: String,

    /// Module that contributed this class (bundles may omit it per class)
    #[serde(default)]
    pub owning_module: ModuleId,

    /// Parent class; absent only for the universal root type
    #[serde(default)]
    pub super_name: Option<String>,

    /// Implemented (or, for interfaces, extended) interfaces in declaration order
    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub is_interface: bool,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,

    /// Annotation types, as internal names or object descriptors
    #[serde(default)]
    pub annotation_types: Vec<String>,
}

/// A declared field: name plus type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub descriptor: String,
}

/// A declared method and the symbolic references made by its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub is_abstract: bool,
    /// Method-call and field-access instructions found in the body
    #[serde(default)]
    pub references: Vec<MemberRef>,
}

/// Kind of member a symbolic reference targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Field,
}

/// A symbolic `(owner, name, descriptor)` reference taken from a method body.
///
/// `owner` may be an internal name or an array descriptor (`[Ljava/lang/Object;` for
/// `clone()` on arrays); resolution unwraps it first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    pub kind: MemberKind,
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

impl MemberRef {
    /// A method-call reference.
    pub fn method(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            kind: MemberKind::Method,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// A field-access reference.
    pub fn field(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            kind: MemberKind::Field,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// A class reference found in a module's markup (e.g. a custom view tag in a layout).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct XmlReference {
    /// Module whose markup contains the reference
    pub module: ModuleId,
    /// Referenced class, dotted (`com.example.Badge`) or internal
    pub class_name: String,
}

impl XmlReference {
    pub fn new(module: impl Into<ModuleId>, class_name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class_name: class_name.into(),
        }
    }
}

impl ClassDescriptor {
    /// Create a concrete class with no members, extending nothing.
    pub fn new(name: impl Into<String>, module: impl Into<ModuleId>) -> Self {
        Self {
            name: name.into(),
            owning_module: module.into(),
            super_name: None,
            interfaces: Vec::new(),
            is_abstract: false,
            is_interface: false,
            fields: Vec::new(),
            methods: Vec::new(),
            annotation_types: Vec::new(),
        }
    }

    /// Create an interface (interfaces are abstract and extend `java/lang/Object`).
    pub fn interface(name: impl Into<String>, module: impl Into<ModuleId>) -> Self {
        let mut desc = Self::new(name, module).with_super("java/lang/Object");
        desc.is_abstract = true;
        desc.is_interface = true;
        desc
    }

    /// Mark the class abstract.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_super(mut self, super_name: impl Into<String>) -> Self {
        self.super_name = Some(super_name.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation_types.push(annotation.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            descriptor: descriptor.into(),
        });
        self
    }

    /// Add a method with a body making the given references.
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        references: Vec<MemberRef>,
    ) -> Self {
        self.methods.push(MethodDescriptor {
            name: name.into(),
            descriptor: descriptor.into(),
            is_abstract: false,
            references,
        });
        self
    }

    /// Add an abstract method (no body, no references).
    pub fn with_abstract_method(
        mut self,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        self.methods.push(MethodDescriptor {
            name: name.into(),
            descriptor: descriptor.into(),
            is_abstract: true,
            references: Vec::new(),
        });
        self
    }

    /// A concrete class is neither abstract nor an interface.
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_interface
    }

    pub fn declares_method(&self, name: &str, descriptor: &str) -> bool {
        self.methods
            .iter()
            .any(|m| m.name == name && m.descriptor == descriptor)
    }

    pub fn declares_field(&self, name: &str, descriptor: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == name && f.descriptor == descriptor)
    }

    /// Check if this class itself declares a member of the given kind with an exact
    /// `(name, descriptor)` match.
    pub fn declares(&self, kind: MemberKind, name: &str, descriptor: &str) -> bool {
        match kind {
            MemberKind::Method => self.declares_method(name, descriptor),
            MemberKind::Field => self.declares_field(name, descriptor),
        }
    }

    pub fn abstract_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.is_abstract)
    }

    /// Methods with a body (including interface default methods).
    pub fn concrete_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| !m.is_abstract)
    }

    /// All member references made by all method bodies, in declaration order.
    pub fn member_references(&self) -> impl Iterator<Item = &MemberRef> {
        self.methods.iter().flat_map(|m| m.references.iter())
    }
}
