//! Module Reference Extractor
//!
//! Reads the inputs of an analysis run from disk, before the engine starts:
//!
//! - **Descriptor bundles** ([`bundle`]): per-module JSON class descriptors
//! - **Markup references** ([`markup`]): class references from layout XML or a JSON list
//!
//! Every failure here is an [`ExtractError`] naming the offending file.

pub mod bundle;
pub mod error;
pub mod markup;

pub use bundle::{into_classes, load_bundle, load_bundles, DescriptorBundle, LoadedBundle};
pub use error::{ExtractError, Result};
pub use markup::{class_tags, load_xml_references, scan_layout_dir, scan_layouts, LayoutSpec};
