//! Module Reference Resolver
//!
//! Static linkage analysis across the modules of a multi-module build.
//!
//! Given the class descriptors of every module, this crate determines which module
//! actually supplies each symbol a module's code references, and reports:
//! - **Dependency edges**: module → module links observed in the code
//! - **Unresolved symbols**: classes, fields and methods nothing supplies (link-time failures)
//! - **Abstract gaps**: inherited abstract methods a concrete class never implements
//!
//! # Modules
//!
//! - [`symbol_table`]: the flat class universe of one run
//! - [`hierarchy`]: bounded superclass and interface walks
//! - [`linkage`]: type and member reference resolution
//! - [`abstract_gaps`]: the abstract-method gap checker
//! - [`filter`]: anchored allow/deny patterns
//! - [`recorder`]: filtered, worker-local accumulation
//! - [`report`]: the immutable result
//!
//! # Example
//!
//! ```
//! use modref_resolver::{analyze, AnalysisInput, AnalysisOptions, FilterPolicy};
//! use modref_types::ClassDescriptor;
//!
//! let subjects = vec![
//!     ClassDescriptor::new("lib/Base", "lib").abstract_class().with_abstract_method("run", "()V"),
//!     ClassDescriptor::new("app/Task", "app").with_super("lib/Base"),
//! ];
//! let policy = FilterPolicy::new(&["app"], &[]).unwrap();
//! let report = analyze(
//!     AnalysisInput { baseline: &[], subjects: &subjects, xml_references: &[], policy: &policy },
//!     &AnalysisOptions::default(),
//! )
//! .unwrap();
//!
//! let app = report.module("app").unwrap();
//! assert!(app.dependencies.contains("lib"));
//! assert!(app.abstract_gaps.contains("lib.Base.run(()V)"));
//! ```

pub mod abstract_gaps;
pub mod analysis;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod linkage;
pub mod recorder;
pub mod report;
pub mod symbol_table;

pub use analysis::{analyze, fold_xml_references, AnalysisInput, AnalysisOptions};
pub use error::{ResolveError, Result};
pub use filter::FilterPolicy;
pub use report::{AnalysisReport, DuplicateClass, ModuleReport, ReportTotals};
pub use symbol_table::{SymbolTable, SymbolTableBuilder};
