//! Fixture builders for CLI tests.
//!
//! A [`Workspace`] is a temp directory holding a small three-module build:
//!
//! | Module | Classes | Problems |
//! |--------|---------|----------|
//! | `rt.jar` (baseline) | `java/lang/Object`, `java/lang/Runnable` | - |
//! | `core` | `com/core/Store`, `com/core/Task` (abstract) | - |
//! | `app` | `com/app/Main`, `com/app/Job` | missing `com.gone.Tracker`, missing `Store.clear`, gap `Task.execute` |

use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the `module-ref` binary built from this package.
pub fn module_ref_cmd() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("module-ref").unwrap()
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let workspace = Self {
            dir: TempDir::new().unwrap(),
        };
        write_json(&workspace.baseline(), &platform_bundle());
        write_json(&workspace.subjects().join("core.json"), &core_bundle());
        write_json(&workspace.subjects().join("app.json"), &app_bundle());
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn baseline(&self) -> PathBuf {
        self.path().join("platform.json")
    }

    pub fn subjects(&self) -> PathBuf {
        self.path().join("bundles")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Write a layout directory for `module` referencing the given custom view tags.
    pub fn layout_dir(&self, name: &str, tags: &[&str]) -> PathBuf {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        let body: String = tags.iter().map(|tag| format!("    <{} />\n", tag)).collect();
        fs::write(
            dir.join("main.xml"),
            format!("<LinearLayout>\n    <TextView />\n{}</LinearLayout>\n", body),
        )
        .unwrap();
        dir
    }
}

pub fn platform_bundle() -> Value {
    json!({
        "module": "rt.jar",
        "classes": [
            { "name": "java/lang/Object", "methods": [{ "name": "toString", "descriptor": "()Ljava/lang/String;" }] },
            { "name": "java/lang/Runnable", "super_name": "java/lang/Object", "is_interface": true, "is_abstract": true,
              "methods": [{ "name": "run", "descriptor": "()V", "is_abstract": true }] }
        ]
    })
}

pub fn core_bundle() -> Value {
    json!({
        "module": "core",
        "classes": [
            { "name": "com/core/Store", "super_name": "java/lang/Object",
              "fields": [{ "name": "size", "descriptor": "I" }],
              "methods": [{ "name": "get", "descriptor": "(I)Ljava/lang/Object;" }] },
            { "name": "com/core/Task", "super_name": "java/lang/Object", "is_abstract": true,
              "interfaces": ["java/lang/Runnable"],
              "methods": [{ "name": "execute", "descriptor": "()V", "is_abstract": true }] }
        ]
    })
}

pub fn app_bundle() -> Value {
    json!({
        "module": "app",
        "classes": [
            { "name": "com/app/Main", "super_name": "java/lang/Object",
              "fields": [{ "name": "store", "descriptor": "Lcom/core/Store;" }],
              "methods": [{ "name": "main", "descriptor": "()V", "references": [
                  { "kind": "method", "owner": "com/core/Store", "name": "get", "descriptor": "(I)Ljava/lang/Object;" },
                  { "kind": "field", "owner": "com/core/Store", "name": "size", "descriptor": "I" },
                  { "kind": "method", "owner": "com/core/Store", "name": "clear", "descriptor": "()V" },
                  { "kind": "method", "owner": "com/gone/Tracker", "name": "track", "descriptor": "()V" }
              ]}] },
            { "name": "com/app/Job", "super_name": "com/core/Task",
              "methods": [{ "name": "run", "descriptor": "()V" }] }
        ]
    })
}
