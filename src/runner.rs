//! Analysis runner.
//!
//! Loads every input from disk, runs the engine once and returns the report together with
//! the provenance needed for `run_metadata.json`. Collaborator failures (unreadable bundles,
//! malformed markup) surface here, before the engine starts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use modref_extractor::{
    into_classes, load_bundles, load_xml_references, scan_layouts, LayoutSpec, LoadedBundle,
};
use modref_resolver::{analyze, AnalysisInput, AnalysisReport};
use modref_types::XmlReference;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::output::{InputCounts, InputDigest, RunMetadata};

/// Paths and settings of one run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub baseline: Vec<PathBuf>,
    pub subjects: Vec<PathBuf>,
    pub markup: Vec<PathBuf>,
    pub layouts: Vec<LayoutSpec>,
    pub config: AnalysisConfig,
}

/// A finished run.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: AnalysisReport,
    pub metadata: RunMetadata,
}

pub fn run_analysis(request: &RunRequest) -> Result<RunOutcome> {
    let baseline = load_bundles(&request.baseline).context("load baseline bundles")?;
    let subjects = load_bundles(&request.subjects).context("load subject bundles")?;

    let mut xml_references: Vec<XmlReference> = Vec::new();
    for path in &request.markup {
        let refs = load_xml_references(path)
            .with_context(|| format!("load markup references {}", path.display()))?;
        xml_references.extend(refs);
    }
    xml_references.extend(scan_layouts(&request.layouts).context("scan layout directories")?);

    let mut inputs = Vec::new();
    for path in bundle_paths(&baseline)
        .chain(bundle_paths(&subjects))
        .chain(request.markup.iter())
    {
        inputs.push(InputDigest::of_file(path)?);
    }

    let baseline_bundles = baseline.len();
    let subject_bundles = subjects.len();
    let baseline_classes = into_classes(baseline);
    let subject_classes = into_classes(subjects);
    let counts = InputCounts {
        baseline_bundles,
        baseline_classes: baseline_classes.len(),
        subject_bundles,
        subject_classes: subject_classes.len(),
        xml_references: xml_references.len(),
    };
    info!(
        baseline_classes = counts.baseline_classes,
        subject_classes = counts.subject_classes,
        xml_references = counts.xml_references,
        "inputs loaded"
    );

    let policy = request.config.filter_policy()?;
    let report = analyze(
        AnalysisInput {
            baseline: &baseline_classes,
            subjects: &subject_classes,
            xml_references: &xml_references,
            policy: &policy,
        },
        &request.config.options(),
    )?;

    let metadata = RunMetadata::new(inputs, counts, &report, &request.config);
    Ok(RunOutcome { report, metadata })
}

fn bundle_paths(bundles: &[LoadedBundle]) -> impl Iterator<Item = &PathBuf> {
    bundles.iter().map(|loaded| &loaded.path)
}
