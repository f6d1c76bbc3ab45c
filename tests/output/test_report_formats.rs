// Human and JSON report rendering over a real lint run.
use std::fs;

use strake_lint::paths::{check_paths, LintRun};
use strake_output::human::HumanFormatter;
use strake_output::json::JsonFormatter;
use strake_output::OutputFormatter;

fn lint_fixture() -> LintRun {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("some_module.py");
    fs::write(
        &path,
        "\
from icontract import require

@require(lambda y: y > 0)
def f(x):
    return x
",
    )
    .unwrap();
    check_paths(&[path]).unwrap()
}

#[test]
fn human_report_lists_findings_and_summary() {
    let run = lint_fixture();
    let out = HumanFormatter { verbose: false }.format_run(&run);

    assert!(out.contains("some_module.py:3:"));
    assert!(out.contains("(pre-invalid-arg)"));
    assert!(out.contains("Precondition argument(s) are missing in the function signature: y"));
    assert!(out.ends_with("1 contract error(s) in 1 file(s)\n"));
}

#[test]
fn human_report_verbose_success_line() {
    let out = HumanFormatter { verbose: true }.format_run(&LintRun::default());
    assert_eq!(out, "No contract errors detected.\n");

    let out = HumanFormatter { verbose: false }.format_run(&LintRun::default());
    assert!(out.is_empty());
}

#[test]
fn json_report_has_identifier_message_line() {
    let run = lint_fixture();
    let out = JsonFormatter.format_run(&run);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

    let files = parsed.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["path"].as_str().unwrap().ends_with("some_module.py"));

    let findings = files[0]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["identifier"], "pre-invalid-arg");
    assert_eq!(findings[0]["line"], 3);
    assert!(findings[0]["message"]
        .as_str()
        .unwrap()
        .contains('y'));
}
