//! Scan-layout command - list class references in a layout directory

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use modref_extractor::scan_layout_dir;

#[derive(Parser, Debug)]
pub struct ScanLayoutCmd {
    /// Module id the layouts belong to
    #[arg(long, value_name = "ID")]
    pub module: String,

    /// Layout directory (or a resource root containing `layout/`)
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Also write the references as a JSON list usable with `analyze --markup`
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ScanLayoutCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let references = scan_layout_dir(&self.module, &self.dir)
            .with_context(|| format!("scan layouts in {}", self.dir.display()))?;

        if let Some(out) = &self.out {
            fs::write(out, serde_json::to_string_pretty(&references)?)
                .with_context(|| format!("write {}", out.display()))?;
        }

        if json_output {
            println!("{}", serde_json::to_string_pretty(&references)?);
        } else {
            println!(
                "Layout references: {} ({} classes)",
                self.module,
                references.len()
            );
            for reference in &references {
                println!("  {}", reference.class_name);
            }
        }
        Ok(())
    }
}
