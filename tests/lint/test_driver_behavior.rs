// File-level driver behavior: failures, the disable directive, idempotence.
use std::fs;

use strake_core::types::ErrorId;
use strake_lint::paths::check_paths;

#[test]
fn unreadable_file_maps_to_exactly_one_finding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.py");
    // Not valid UTF-8, so reading as text fails.
    fs::write(&path, b"def f():\n    return \xff\xfe\n").unwrap();

    let run = check_paths(&[path]).unwrap();
    assert_eq!(run.files.len(), 1);
    let findings = run.files.values().next().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, ErrorId::Unreadable);
    assert_eq!(findings[0].line, None);
}

#[test]
fn invalid_syntax_maps_to_exactly_one_finding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.py");
    fs::write(&path, "def f(:\n    pass\n").unwrap();

    let run = check_paths(&[path]).unwrap();
    let findings = run.files.values().next().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].id, ErrorId::InvalidSyntax);
}

#[test]
fn disabled_file_is_skipped_even_when_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("off.py");
    fs::write(&path, "# strake: disabled\ndef f(:\n").unwrap();

    let run = check_paths(&[path]).unwrap();
    assert!(run.is_clean());
}

#[test]
fn disabled_file_suppresses_real_findings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("off.py");
    fs::write(
        &path,
        "# strake: disabled\n@require(lambda y: y > 0)\ndef f(x):\n    pass\n",
    )
    .unwrap();

    let run = check_paths(&[path]).unwrap();
    assert!(run.is_clean());
}

#[test]
fn one_file_failure_does_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.py"), "def f(:\n").unwrap();
    fs::write(
        dir.path().join("checked.py"),
        "@require(lambda y: y > 0)\ndef f(x):\n    pass\n",
    )
    .unwrap();

    let run = check_paths(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(run.files.len(), 2);

    let ids: Vec<ErrorId> = run
        .files
        .values()
        .flat_map(|findings| findings.iter().map(|f| f.id))
        .collect();
    assert!(ids.contains(&ErrorId::InvalidSyntax));
    assert!(ids.contains(&ErrorId::PreInvalidArg));
}

#[test]
fn linting_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("some_module.py");
    fs::write(
        &path,
        "\
@require(lambda y: y > 0)
@ensure(lambda result: result > 0)
def f(x) -> None:
    pass
",
    )
    .unwrap();

    let first = check_paths(std::slice::from_ref(&path)).unwrap();
    let second = check_paths(std::slice::from_ref(&path)).unwrap();
    assert_eq!(first.files, second.files);
    assert!(first.total() > 0);
}
