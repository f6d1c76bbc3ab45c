use serde::Serialize;

use crate::OutputFormatter;
use strake_core::types::Finding;
use strake_lint::paths::LintRun;

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a str,
    findings: &'a [Finding],
}

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_run(&self, run: &LintRun) -> String {
        let reports: Vec<FileReport<'_>> = run
            .files
            .iter()
            .map(|(path, findings)| FileReport {
                path,
                findings,
            })
            .collect();
        serde_json::to_string_pretty(&reports).unwrap_or_default()
    }
}
