//! Markup class references.
//!
//! Layout files reference custom view classes by their fully-qualified name used as the
//! element tag (`<com.example.ui.Badge .../>`). Platform widgets use bare tags
//! (`<TextView/>`), so any tag containing a `.` is taken as a class reference.
//!
//! References come either from a pre-computed JSON list or from scanning a module's
//! layout directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use modref_types::{ModuleId, XmlReference};
use tracing::debug;

use crate::error::{ExtractError, Result};

/// A `MODULE=DIR` pair naming a module's layout directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSpec {
    pub module: ModuleId,
    pub dir: PathBuf,
}

impl std::str::FromStr for LayoutSpec {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self> {
        // Split on the first `=` only.
        match spec.split_once('=') {
            Some((module, dir)) if !module.trim().is_empty() && !dir.trim().is_empty() => {
                Ok(Self {
                    module: module.trim().to_string(),
                    dir: PathBuf::from(dir.trim()),
                })
            }
            _ => Err(ExtractError::InvalidLayoutSpec(spec.to_string())),
        }
    }
}

/// Read a JSON list of `{ "module": ..., "class_name": ... }` references.
pub fn load_xml_references(path: &Path) -> Result<Vec<XmlReference>> {
    let contents = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Class names (dotted) referenced by element tags in one XML document.
pub fn class_tags(xml: &str) -> std::result::Result<BTreeSet<String>, roxmltree::Error> {
    let document = roxmltree::Document::parse(xml)?;
    Ok(document
        .descendants()
        .filter(|node| node.is_element())
        .map(|node| node.tag_name().name())
        .filter(|name| name.contains('.'))
        .map(str::to_string)
        .collect())
}

/// Scan the `*.xml` files of a layout directory for class references of `module`.
///
/// If `dir` contains a `layout` subdirectory (a resource root), that subdirectory is
/// scanned instead. Files are visited in sorted order; each class is reported once.
pub fn scan_layout_dir(module: &str, dir: &Path) -> Result<Vec<XmlReference>> {
    let layout_dir = dir.join("layout");
    let dir = if layout_dir.is_dir() {
        layout_dir.as_path()
    } else {
        dir
    };

    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| ExtractError::io(dir, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ExtractError::io(dir, e))?;
    entries.sort_by_key(|e| e.path());

    let mut classes = BTreeSet::new();
    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("xml") {
            continue;
        }
        let contents = fs::read_to_string(&path).map_err(|e| ExtractError::io(&path, e))?;
        let found = class_tags(&contents).map_err(|source| ExtractError::Xml {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), classes = found.len(), "scanned layout");
        classes.extend(found);
    }

    Ok(classes
        .into_iter()
        .map(|class_name| XmlReference::new(module, class_name))
        .collect())
}

/// Scan every layout directory in `specs`, in order.
pub fn scan_layouts(specs: &[LayoutSpec]) -> Result<Vec<XmlReference>> {
    let mut references = Vec::new();
    for spec in specs {
        references.extend(scan_layout_dir(&spec.module, &spec.dir)?);
    }
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LAYOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
    android:layout_width="match_parent"
    android:layout_height="match_parent">
    <TextView android:id="@+id/title" />
    <com.example.ui.Badge android:id="@+id/badge" />
    <androidx.recyclerview.widget.RecyclerView android:id="@+id/list" />
    <com.example.ui.Badge android:id="@+id/badge2" />
</LinearLayout>
"#;

    #[test]
    fn test_class_tags_picks_dotted_tags() {
        let tags = class_tags(LAYOUT).unwrap();
        let tags: Vec<_> = tags.into_iter().collect();
        assert_eq!(
            tags,
            vec![
                "androidx.recyclerview.widget.RecyclerView",
                "com.example.ui.Badge"
            ]
        );
    }

    #[test]
    fn test_scan_layout_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.xml"), LAYOUT).unwrap();
        fs::write(
            dir.path().join("item.xml"),
            r#"<com.example.ui.Card><com.example.ui.Badge/></com.example.ui.Card>"#,
        )
        .unwrap();
        fs::write(dir.path().join("readme.txt"), "<not.xml/>").unwrap();

        let refs = scan_layout_dir("app", dir.path()).unwrap();
        let names: Vec<_> = refs.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "androidx.recyclerview.widget.RecyclerView",
                "com.example.ui.Badge",
                "com.example.ui.Card"
            ]
        );
        assert!(refs.iter().all(|r| r.module == "app"));
    }

    #[test]
    fn test_scan_resource_root_uses_layout_subdir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("layout")).unwrap();
        fs::write(dir.path().join("layout/main.xml"), LAYOUT).unwrap();
        fs::write(dir.path().join("values.xml"), "<resources><x.Y/></resources>").unwrap();

        let refs = scan_layout_dir("app", dir.path()).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(!refs.iter().any(|r| r.class_name == "x.Y"));
    }

    #[test]
    fn test_malformed_layout_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.xml"), "<com.example.Open>").unwrap();
        let err = scan_layout_dir("app", dir.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Xml { .. }));
    }

    #[test]
    fn test_layout_spec_parsing() {
        let spec: LayoutSpec = "com.example:ui:1.0=res/layout".parse().unwrap();
        assert_eq!(spec.module, "com.example:ui:1.0");
        assert_eq!(spec.dir, PathBuf::from("res/layout"));

        assert!("no-separator".parse::<LayoutSpec>().is_err());
        assert!("=dir".parse::<LayoutSpec>().is_err());
        assert!("module=".parse::<LayoutSpec>().is_err());
    }

    #[test]
    fn test_load_xml_references() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("markup.json");
        fs::write(
            &path,
            r#"[{"module": "app", "class_name": "com.example.ui.Badge"}]"#,
        )
        .unwrap();

        let refs = load_xml_references(&path).unwrap();
        assert_eq!(refs, vec![XmlReference::new("app", "com.example.ui.Badge")]);
    }
}
