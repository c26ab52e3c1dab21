//! Descriptor bundles.
//!
//! A bundle is the JSON form of one module's classes:
//!
//! ```json
//! {
//!   "module": "com.example:core:1.0",
//!   "classes": [
//!     { "name": "com/example/core/Store", "super_name": "java/lang/Object" }
//!   ]
//! }
//! ```
//!
//! Classes inherit the bundle's module id; any `owning_module` written in the file is
//! replaced so a bundle can never claim classes for another module.

use std::fs;
use std::path::{Path, PathBuf};

use modref_types::{ClassDescriptor, ModuleId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

/// The classes contributed by one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorBundle {
    pub module: ModuleId,
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
}

impl DescriptorBundle {
    pub fn new(module: impl Into<ModuleId>, classes: Vec<ClassDescriptor>) -> Self {
        let mut bundle = Self {
            module: module.into(),
            classes,
        };
        bundle.stamp_module();
        bundle
    }

    fn stamp_module(&mut self) {
        for class in &mut self.classes {
            if !class.owning_module.is_empty() && class.owning_module != self.module {
                warn!(
                    class = %class.name,
                    declared = %class.owning_module,
                    module = %self.module,
                    "class declares a different module than its bundle"
                );
            }
            class.owning_module.clone_from(&self.module);
        }
    }
}

/// A bundle together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedBundle {
    pub path: PathBuf,
    pub bundle: DescriptorBundle,
}

/// Read one bundle file.
pub fn load_bundle(path: &Path) -> Result<DescriptorBundle> {
    let contents = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    let mut bundle: DescriptorBundle =
        serde_json::from_str(&contents).map_err(|source| ExtractError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    bundle.stamp_module();
    debug!(
        path = %path.display(),
        module = %bundle.module,
        classes = bundle.classes.len(),
        "loaded descriptor bundle"
    );
    Ok(bundle)
}

/// Load every bundle named by `paths`.
///
/// Files are read directly; directories are scanned recursively for `*.json` files in
/// sorted path order. Results keep the order of `paths`.
pub fn load_bundles<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LoadedBundle>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            collect_json_files(path, &mut files)?;
        } else {
            files.push(path.to_path_buf());
        }
    }

    files
        .into_iter()
        .map(|path| {
            let bundle = load_bundle(&path)?;
            Ok(LoadedBundle { path, bundle })
        })
        .collect()
}

/// Flatten loaded bundles into one class list, in load order.
pub fn into_classes(bundles: Vec<LoadedBundle>) -> Vec<ClassDescriptor> {
    bundles
        .into_iter()
        .flat_map(|loaded| loaded.bundle.classes)
        .collect()
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| ExtractError::io(dir, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ExtractError::io(dir, e))?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks, so linked directories are skipped.
        let file_type = entry.file_type().map_err(|e| ExtractError::io(&path, e))?;
        if file_type.is_dir() {
            collect_json_files(&path, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "skipping symlinked directory");
        } else if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    Ok(())
}
