//! Run configuration.
//!
//! Settings are layered, later layers winning:
//!
//! | Layer | Source |
//! |-------|--------|
//! | 1 | Built-in defaults |
//! | 2 | JSON config file (`--config`) |
//! | 3 | `MODULE_REF_*` environment variables |
//! | 4 | Command-line flags |
//!
//! List settings from a later layer replace the earlier list; they are never merged.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use modref_resolver::{AnalysisOptions, FilterPolicy};
use modref_types::env_utils::{env_bool_or, env_list, env_var};
use serde::{Deserialize, Serialize};

pub const ENV_ENTRY_MODULES: &str = "MODULE_REF_ENTRY_MODULES";
pub const ENV_IGNORE_CLASSES: &str = "MODULE_REF_IGNORE_CLASSES";
pub const ENV_FAIL_ON_DUPLICATE: &str = "MODULE_REF_FAIL_ON_DUPLICATE";
pub const ENV_THREADS: &str = "MODULE_REF_THREADS";

/// Effective settings of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Modules whose records are kept (full-match regexes; empty keeps all)
    pub entry_modules: Vec<String>,
    /// Classes whose unresolved records are dropped (full-match regexes, dotted names)
    pub ignore_classes: Vec<String>,
    pub fail_on_duplicate: bool,
    /// Extra module ids never recorded as dependency targets
    pub baseline_modules: Vec<String>,
    pub threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            entry_modules: Vec::new(),
            ignore_classes: Vec::new(),
            fail_on_duplicate: true,
            baseline_modules: Vec::new(),
            threads: None,
        }
    }
}

/// Command-line overrides (layer 4).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub entry_modules: Vec<String>,
    pub ignore_classes: Vec<String>,
    pub keep_first_duplicate: bool,
    pub threads: Option<usize>,
}

impl AnalysisConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parse config {}", path.display()))
    }

    /// Build the effective configuration from every layer.
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Apply `MODULE_REF_*` environment overrides.
    pub fn apply_env(&mut self) {
        let entry_modules = env_list(ENV_ENTRY_MODULES);
        if !entry_modules.is_empty() {
            self.entry_modules = entry_modules;
        }
        let ignore_classes = env_list(ENV_IGNORE_CLASSES);
        if !ignore_classes.is_empty() {
            self.ignore_classes = ignore_classes;
        }
        self.fail_on_duplicate = env_bool_or(ENV_FAIL_ON_DUPLICATE, self.fail_on_duplicate);
        if let Some(threads) = env_var::<usize>(ENV_THREADS) {
            self.threads = Some(threads);
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if !overrides.entry_modules.is_empty() {
            self.entry_modules = overrides.entry_modules.clone();
        }
        if !overrides.ignore_classes.is_empty() {
            self.ignore_classes = overrides.ignore_classes.clone();
        }
        if overrides.keep_first_duplicate {
            self.fail_on_duplicate = false;
        }
        if overrides.threads.is_some() {
            self.threads = overrides.threads;
        }
    }

    /// Compile the entry/ignore patterns.
    pub fn filter_policy(&self) -> Result<FilterPolicy> {
        FilterPolicy::new(&self.entry_modules, &self.ignore_classes)
            .context("compile filter patterns")
    }

    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            fail_on_duplicate: self.fail_on_duplicate,
            baseline_modules: self.baseline_modules.iter().cloned().collect::<BTreeSet<_>>(),
            threads: self.threads.filter(|&n| n > 0),
        }
    }
}
