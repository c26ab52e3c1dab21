//! Allow-list and deny-list filtering.
//!
//! Patterns are regular expressions matched against the *whole* identifier: `app` matches
//! the module `app` but not `app-core`. Write `app.*` to match a prefix.
//!
//! - **Entry modules** gate every record by the referencing module. An empty list admits all
//!   modules.
//! - **Ignored classes** suppress unresolved-symbol records only. Class names are matched in
//!   dotted form (`com.example.Widget`).

use regex::Regex;

use crate::error::{ResolveError, Result};
use modref_types::to_dotted;

/// A user-supplied pattern compiled as a full-string match.
#[derive(Debug, Clone)]
struct AnchoredPattern {
    source: String,
    regex: Regex,
}

impl AnchoredPattern {
    fn compile(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ResolveError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Allow/deny policy applied to every record before it reaches the report.
#[derive(Debug, Clone, Default)]
pub struct FilterPolicy {
    entry_modules: Vec<AnchoredPattern>,
    ignore_classes: Vec<AnchoredPattern>,
}

impl FilterPolicy {
    /// Compile a policy from entry-module and ignored-class patterns.
    ///
    /// # Example
    ///
    /// ```
    /// use modref_resolver::filter::FilterPolicy;
    ///
    /// let policy = FilterPolicy::new(&["app"], &["android\\..*"]).unwrap();
    /// assert!(policy.admits_module("app"));
    /// assert!(!policy.admits_module("app-core"));
    /// assert!(policy.ignores_class("android/view/View"));
    /// ```
    pub fn new<S: AsRef<str>>(
        entry_module_patterns: &[S],
        ignore_class_patterns: &[S],
    ) -> Result<Self> {
        let entry_modules = entry_module_patterns
            .iter()
            .map(|p| AnchoredPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let ignore_classes = ignore_class_patterns
            .iter()
            .map(|p| AnchoredPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entry_modules,
            ignore_classes,
        })
    }

    /// A policy that admits every module and ignores nothing.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Check if records attributed to `module` may be recorded.
    pub fn admits_module(&self, module: &str) -> bool {
        self.entry_modules.is_empty() || self.entry_modules.iter().any(|p| p.matches(module))
    }

    /// Check if unresolved records naming `name` should be suppressed.
    ///
    /// `name` may be internal or dotted; it is normalized to dotted form first.
    pub fn ignores_class(&self, name: &str) -> bool {
        if self.ignore_classes.is_empty() {
            return false;
        }
        let dotted = to_dotted(name);
        self.ignore_classes.iter().any(|p| p.matches(&dotted))
    }

    pub fn entry_module_patterns(&self) -> impl Iterator<Item = &str> {
        self.entry_modules.iter().map(|p| p.source.as_str())
    }

    pub fn ignore_class_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignore_classes.iter().map(|p| p.source.as_str())
    }
}
