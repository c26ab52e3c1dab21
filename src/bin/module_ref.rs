//! module-ref: static cross-module linkage analysis
//!
//! Predicts link-time failures in a multi-module build before it ships: missing classes,
//! missing fields and methods, and concrete classes that leave inherited abstract methods
//! unimplemented. Also emits the module dependency graph.
//!
//! ## Commands
//!
//! - **analyze**: Run the analysis over descriptor bundles and markup references
//! - **scan-layout**: List the custom view classes referenced by a layout directory
//!
//! ## Example Usage
//!
//! ```bash
//! # Analyze an app against the platform jars, writing every report file
//! module-ref analyze --baseline platform/ --subject build/bundles/ --out-dir build/moduleRef
//!
//! # Only report records of the app module, ignoring vendor SDK classes
//! module-ref analyze --baseline platform/ --subject build/bundles/ \
//!     --entry-module '^app$' --ignore-class 'com\.vendor\..*'
//!
//! # Fail a CI build on any unresolved symbol or abstract gap
//! module-ref analyze --baseline platform/ --subject build/bundles/ --fail-on-unresolved
//!
//! # Show what a module's layouts reference
//! module-ref scan-layout --module app --dir app/src/main/res/layout
//! ```
//!
//! Logging goes to stderr and is controlled by `MODULE_REF_LOG` (an `EnvFilter`
//! directive such as `debug` or `modref_resolver=trace`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod module_ref_cli;

use module_ref_cli::{analyze::AnalyzeCmd, scan_layout::ScanLayoutCmd};

#[derive(Parser)]
#[command(
    name = "module-ref",
    author,
    version,
    about = "Static cross-module linkage analysis",
    long_about = "Resolves every symbolic reference of every module against the classes the \
                  build provides.\n\n\
                  Reports the module dependency graph, unresolved classes/fields/methods and \
                  missing abstract-method overrides."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (info-level logging unless MODULE_REF_LOG is set)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze descriptor bundles and report linkage problems
    Analyze(AnalyzeCmd),

    /// List class references found in a layout directory
    ScanLayout(ScanLayoutCmd),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MODULE_REF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
    } = Cli::parse();
    init_tracing(verbose);

    match command {
        Commands::Analyze(cmd) => cmd.execute(json, verbose),
        Commands::ScanLayout(cmd) => cmd.execute(json),
    }
}
