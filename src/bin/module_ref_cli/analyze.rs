//! Analyze command - resolve every module's references and report linkage problems

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use module_ref::output::write_report_files;
use module_ref::{run_analysis, AnalysisConfig, ConfigOverrides, RunRequest};
use modref_extractor::LayoutSpec;

use super::output::{format_report, AnalyzeJson};

#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Baseline bundle file or directory (platform/runtime classes, never analyzed)
    #[arg(long, value_name = "PATH")]
    pub baseline: Vec<PathBuf>,

    /// Subject bundle file or directory (modules under analysis)
    #[arg(long, value_name = "PATH", required = true)]
    pub subject: Vec<PathBuf>,

    /// JSON list of markup class references
    #[arg(long, value_name = "FILE")]
    pub markup: Vec<PathBuf>,

    /// Layout directory of a module, as MODULE=DIR
    #[arg(long, value_name = "MODULE=DIR")]
    pub layout: Vec<LayoutSpec>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only keep records of modules matching this regex (full match, repeatable)
    #[arg(long, value_name = "REGEX")]
    pub entry_module: Vec<String>,

    /// Drop unresolved records of classes matching this regex (full match, repeatable)
    #[arg(long, value_name = "REGEX")]
    pub ignore_class: Vec<String>,

    /// Keep the first of two subject classes with the same name instead of failing
    #[arg(long, default_value_t = false)]
    pub keep_first_duplicate: bool,

    /// Worker threads for resolution (default: all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Write moduleRef.json, absMethod.json, moduleRef.puml, moduleRef.mmd and
    /// run_metadata.json into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Exit with an error if any unresolved symbol or abstract gap remains
    #[arg(long, default_value_t = false)]
    pub fail_on_unresolved: bool,
}

impl AnalyzeCmd {
    pub fn execute(&self, json_output: bool, verbose: bool) -> Result<()> {
        let overrides = ConfigOverrides {
            entry_modules: self.entry_module.clone(),
            ignore_classes: self.ignore_class.clone(),
            keep_first_duplicate: self.keep_first_duplicate,
            threads: self.threads,
        };
        let config = AnalysisConfig::resolve(self.config.as_deref(), &overrides)?;

        let request = RunRequest {
            baseline: self.baseline.clone(),
            subjects: self.subject.clone(),
            markup: self.markup.clone(),
            layouts: self.layout.clone(),
            config,
        };
        let outcome = run_analysis(&request)?;

        let written = match &self.out_dir {
            Some(dir) => write_report_files(dir, &outcome.report, &outcome.metadata)?,
            None => Vec::new(),
        };

        if json_output {
            let json = AnalyzeJson::new(&outcome.report, written);
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            print!("{}", format_report(&outcome.report, verbose));
            for path in &written {
                println!("Wrote {}", path.display());
            }
        }

        if self.fail_on_unresolved && !outcome.report.is_clean() {
            let totals = outcome.report.totals();
            bail!(
                "linkage check failed: {} unresolved symbol(s), {} abstract gap(s)",
                totals.unresolved_classes + totals.unresolved_fields + totals.unresolved_methods,
                totals.abstract_gaps
            );
        }
        Ok(())
    }
}
