//! Report rendering.
//!
//! Files written by `module-ref analyze --out-dir DIR`:
//!
//! | File | Contents |
//! |------|----------|
//! | `moduleRef.json` | Dependencies and unresolved symbols per module |
//! | `absMethod.json` | Abstract gaps per module |
//! | `moduleRef.puml` | Dependency graph as PlantUML |
//! | `moduleRef.mmd` | Dependency graph as Mermaid |
//! | `run_metadata.json` | Tool version, timestamp, input digests, counts, configuration |
//!
//! Every map and set is ordered, so for fixed inputs the files are byte-identical across
//! runs (apart from the timestamp in `run_metadata.json`).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use modref_resolver::{AnalysisReport, DuplicateClass, ReportTotals};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::AnalysisConfig;

pub const MODULE_REF_FILE: &str = "moduleRef.json";
pub const ABS_METHOD_FILE: &str = "absMethod.json";
pub const PLANTUML_FILE: &str = "moduleRef.puml";
pub const MERMAID_FILE: &str = "moduleRef.mmd";
pub const RUN_METADATA_FILE: &str = "run_metadata.json";

// =============================================================================
// moduleRef.json / absMethod.json
// =============================================================================

/// Unresolved symbols of one module, as written to `moduleRef.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unsolved<'a> {
    pub clazz: &'a BTreeSet<String>,
    pub fields: &'a BTreeSet<String>,
    pub methods: &'a BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRefEntry<'a> {
    pub dependencies: &'a BTreeSet<String>,
    pub unsolved: Unsolved<'a>,
}

/// Modules with dependencies or unresolved symbols. Gap-only modules are left to
/// [`abs_method_map`].
pub fn module_ref_map(report: &AnalysisReport) -> BTreeMap<&str, ModuleRefEntry<'_>> {
    report
        .modules()
        .iter()
        .filter(|(_, m)| !m.dependencies.is_empty() || m.unresolved_count() > 0)
        .map(|(module, m)| {
            let entry = ModuleRefEntry {
                dependencies: &m.dependencies,
                unsolved: Unsolved {
                    clazz: &m.unresolved_classes,
                    fields: &m.unresolved_fields,
                    methods: &m.unresolved_methods,
                },
            };
            (module.as_str(), entry)
        })
        .collect()
}

/// Abstract gaps of every module that has any.
pub fn abs_method_map(report: &AnalysisReport) -> BTreeMap<&str, &BTreeSet<String>> {
    report
        .modules()
        .iter()
        .filter(|(_, m)| !m.abstract_gaps.is_empty())
        .map(|(module, m)| (module.as_str(), &m.abstract_gaps))
        .collect()
}

// =============================================================================
// Graphs
// =============================================================================

pub fn render_plantuml(report: &AnalysisReport) -> String {
    let mut out = String::from("@startuml\n");
    for (source, target) in report.dependency_edges() {
        out.push_str(&format!("({}) --> ({})\n", source, target));
    }
    out.push_str("@enduml\n");
    out
}

pub fn render_mermaid(report: &AnalysisReport) -> String {
    let mut out = String::from("graph TD\n");
    for (source, target) in report.dependency_edges() {
        out.push_str(&format!("  {} --> {}\n", source, target));
    }
    out
}

// =============================================================================
// Run metadata
// =============================================================================

/// SHA-256 of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDigest {
    pub path: PathBuf,
    pub sha256: String,
}

impl InputDigest {
    pub fn of_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    pub baseline_bundles: usize,
    pub baseline_classes: usize,
    pub subject_bundles: usize,
    pub subject_classes: usize,
    pub xml_references: usize,
}

/// Provenance of one run, written to `run_metadata.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub inputs: Vec<InputDigest>,
    pub counts: InputCounts,
    pub totals: ReportTotals,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicate_classes: Vec<DuplicateClass>,
    pub config: AnalysisConfig,
}

impl RunMetadata {
    pub fn new(
        inputs: Vec<InputDigest>,
        counts: InputCounts,
        report: &AnalysisReport,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            inputs,
            counts,
            totals: report.totals(),
            duplicate_classes: report.duplicate_classes().to_vec(),
            config: config.clone(),
        }
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Write every report file into `dir`, creating it if needed. Returns the written paths.
pub fn write_report_files(
    dir: &Path,
    report: &AnalysisReport,
    metadata: &RunMetadata,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let files = [
        (
            MODULE_REF_FILE,
            serde_json::to_string_pretty(&module_ref_map(report))?,
        ),
        (
            ABS_METHOD_FILE,
            serde_json::to_string_pretty(&abs_method_map(report))?,
        ),
        (PLANTUML_FILE, render_plantuml(report)),
        (MERMAID_FILE, render_mermaid(report)),
        (RUN_METADATA_FILE, serde_json::to_string_pretty(metadata)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "wrote report file");
        written.push(path);
    }
    Ok(written)
}
