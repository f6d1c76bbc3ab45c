// End-to-end rule checks over real files on disk.
use std::fs;
use std::path::PathBuf;

use strake_core::types::ErrorId;
use strake_lint::paths::{check_paths, LintRun};

fn lint_source(source: &str) -> LintRun {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("some_module.py");
    fs::write(&path, source).unwrap();
    check_paths(&[path]).unwrap()
}

fn sole_findings(run: &LintRun) -> &[strake_core::types::Finding] {
    assert_eq!(run.files.len(), 1, "expected findings for exactly one file");
    run.files.values().next().unwrap()
}

#[test]
fn valid_precondition_is_clean() {
    let run = lint_source(
        "\
from icontract import require

@require(lambda x: x > 0)
def some_func(x, y):
    return x + y
",
    );
    assert!(run.is_clean());
}

#[test]
fn precondition_referencing_unknown_arg() {
    let run = lint_source(
        "\
from icontract import require

@require(lambda y: y > 0)
def f(x):
    return x
",
    );
    let findings = sole_findings(&run);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, ErrorId::PreInvalidArg);
    assert!(findings[0].message.contains('y'));
    assert_eq!(findings[0].line, Some(3));
}

#[test]
fn postcondition_result_on_none_function() {
    let run = lint_source(
        "\
from icontract import ensure

@ensure(lambda result: result > 0)
def f() -> None:
    pass
",
    );
    let findings = sole_findings(&run);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, ErrorId::PostResultNone);
}

#[test]
fn invariant_with_extra_argument() {
    let run = lint_source(
        "\
from icontract import invariant

@invariant(lambda self, x: self.x > 0)
class A:
    pass
",
    );
    let findings = sole_findings(&run);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, ErrorId::InvInvalidArg);
    assert!(findings[0].message.contains('x'));
}

#[test]
fn snapshot_without_postcondition_is_reported_once() {
    let run = lint_source(
        "\
from icontract import snapshot

@snapshot(lambda lst: lst[:])
@snapshot(lambda lst: len(lst))
def f(lst, value):
    lst.append(value)
",
    );
    let findings = sole_findings(&run);
    let wo_post: Vec<_> = findings
        .iter()
        .filter(|f| f.id == ErrorId::SnapshotWoPost)
        .collect();
    assert_eq!(wo_post.len(), 1);
}

#[test]
fn snapshot_with_old_and_postcondition_is_clean() {
    let run = lint_source(
        "\
from icontract import ensure, snapshot

def some_len(lst):
    return len(lst)

@snapshot(lambda lst: lst[:])
@snapshot(capture=some_len, name=\"len_lst\")
@ensure(lambda OLD, lst, value: OLD.len_lst + 1 == len(lst))
def some_func(lst, value):
    lst.append(value)
",
    );
    assert!(run.is_clean());
}

#[test]
fn findings_from_several_files_are_keyed_by_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("b.py"),
        "@require(lambda y: y > 0)\ndef f(x):\n    pass\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("a.py"),
        "@ensure(lambda result: result)\ndef g() -> None:\n    pass\n",
    )
    .unwrap();
    fs::write(dir.path().join("c.py"), "def clean(x):\n    return x\n").unwrap();

    let run = check_paths(&[PathBuf::from(dir.path())]).unwrap();
    assert_eq!(run.files.len(), 2);
    assert_eq!(run.total(), 2);

    let paths: Vec<&String> = run.files.keys().collect();
    assert!(paths[0].ends_with("a.py"));
    assert!(paths[1].ends_with("b.py"));
}
