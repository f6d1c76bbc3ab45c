//! Output formatters for strake lint runs.
//!
//! Two modes:
//! - **Human** (default): one line per finding, grouped by file, with a
//!   trailing summary
//! - **JSON** (`--json`): machine-readable per-file report

pub mod human;
pub mod json;

use strake_lint::paths::LintRun;

pub trait OutputFormatter {
    fn format_run(&self, run: &LintRun) -> String;
}
