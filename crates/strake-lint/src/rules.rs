use std::collections::BTreeSet;

use strake_core::types::{ContractKind, ErrorId, Finding};

use crate::extract::{ContractDeclaration, Signature, OLD_ARG, RESULT_ARG};

/// Check every contract declaration of one function or method against its
/// signature. Pure and deterministic; all applicable rules run, so a single
/// declaration can yield several findings. `func_line` anchors function-level
/// findings (`snapshot-wo-post`).
pub fn check_function(
    sig: &Signature,
    decls: &[ContractDeclaration],
    file: &str,
    func_line: u32,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for decl in decls {
        match decl.kind {
            ContractKind::Precondition => {
                if !decl.condition_defined {
                    findings.push(no_condition(decl, file));
                } else {
                    findings.extend(verify_pre(sig, decl, file));
                }
            }
            ContractKind::Postcondition => {
                if !decl.condition_defined {
                    findings.push(no_condition(decl, file));
                } else {
                    findings.extend(verify_post(sig, decl, file));
                }
            }
            ContractKind::Snapshot => {
                if !decl.capture_defined {
                    findings.push(Finding::new(
                        ErrorId::SnapshotWoCapture,
                        "The snapshot decorator lacks the capture function.",
                        file,
                        Some(decl.line),
                    ));
                } else {
                    findings.extend(verify_snapshot(sig, decl, file));
                }
            }
            // Invariants register on classes; one attached to a function is
            // not a contract on its arguments.
            ContractKind::Invariant => {}
        }
    }

    let has_snapshot = decls.iter().any(|d| d.kind == ContractKind::Snapshot);
    let has_post = decls.iter().any(|d| d.kind == ContractKind::Postcondition);
    if has_snapshot && !has_post {
        findings.push(Finding::new(
            ErrorId::SnapshotWoPost,
            "Snapshot defined on a function without a postcondition",
            file,
            Some(func_line),
        ));
    }

    findings
}

/// Check the contract declarations attached to a class. Only invariants are
/// validated beyond well-formedness; well-formed preconditions,
/// postconditions, and snapshots on a class are ignored (classes have no
/// argument list to validate against).
pub fn check_class(decls: &[ContractDeclaration], file: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for decl in decls {
        match decl.kind {
            ContractKind::Snapshot => {
                if !decl.capture_defined {
                    findings.push(Finding::new(
                        ErrorId::SnapshotWoCapture,
                        "The snapshot decorator lacks the capture function.",
                        file,
                        Some(decl.line),
                    ));
                }
            }
            ContractKind::Invariant => {
                if !decl.condition_defined {
                    findings.push(no_condition(decl, file));
                } else {
                    findings.extend(verify_invariant(decl, file));
                }
            }
            ContractKind::Precondition | ContractKind::Postcondition => {
                if !decl.condition_defined {
                    findings.push(no_condition(decl, file));
                }
            }
        }
    }

    findings
}

fn no_condition(decl: &ContractDeclaration, file: &str) -> Finding {
    Finding::new(
        ErrorId::NoCondition,
        format!("The {} decorator lacks the condition.", decl.kind),
        file,
        Some(decl.line),
    )
}

fn verify_pre(sig: &Signature, decl: &ContractDeclaration, file: &str) -> Option<Finding> {
    let missing = missing_args(&decl.condition_args, sig, &[]);
    if missing.is_empty() {
        return None;
    }
    Some(Finding::new(
        ErrorId::PreInvalidArg,
        format!(
            "Precondition argument(s) are missing in the function signature: {}",
            missing.join(", ")
        ),
        file,
        Some(decl.line),
    ))
}

fn verify_post(sig: &Signature, decl: &ContractDeclaration, file: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    if decl.expects_result && sig.has_param(RESULT_ARG) {
        findings.push(Finding::new(
            ErrorId::PostResultConflict,
            format!("Function argument '{RESULT_ARG}' conflicts with the postcondition."),
            file,
            Some(decl.line),
        ));
    }

    if decl.expects_result && !sig.returns_value {
        findings.push(Finding::new(
            ErrorId::PostResultNone,
            "Function is annotated to return None, but postcondition expects a result.",
            file,
            Some(decl.line),
        ));
    }

    if decl.expects_old && sig.has_param(OLD_ARG) {
        findings.push(Finding::new(
            ErrorId::PostOldConflict,
            format!("Function argument '{OLD_ARG}' conflicts with the postcondition."),
            file,
            Some(decl.line),
        ));
    }

    // `result` and `OLD` may appear in the postcondition without being
    // function arguments; everything else must match the signature.
    let missing = missing_args(&decl.condition_args, sig, &[RESULT_ARG, OLD_ARG]);
    if !missing.is_empty() {
        findings.push(Finding::new(
            ErrorId::PostInvalidArg,
            format!(
                "Postcondition argument(s) are missing in the function signature: {}",
                missing.join(", ")
            ),
            file,
            Some(decl.line),
        ));
    }

    findings
}

fn verify_snapshot(sig: &Signature, decl: &ContractDeclaration, file: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    let data_args: Vec<&str> = decl
        .capture_args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != OLD_ARG)
        .collect();

    let missing = missing_args(&decl.capture_args, sig, &[OLD_ARG]);
    if !missing.is_empty() {
        findings.push(Finding::new(
            ErrorId::SnapshotInvalidArg,
            format!(
                "Snapshot argument(s) are missing in the function signature: {}",
                missing.join(", ")
            ),
            file,
            Some(decl.line),
        ));
    }

    // Hard cap: a capture takes at most one data-bearing argument.
    if data_args.len() > 1 {
        findings.push(Finding::new(
            ErrorId::SnapshotInvalidArg,
            format!(
                "Snapshot capture expects at most one argument, but got: {}",
                data_args.join(", ")
            ),
            file,
            Some(decl.line),
        ));
    }

    findings
}

fn verify_invariant(decl: &ContractDeclaration, file: &str) -> Option<Finding> {
    let args: Vec<&str> = decl.condition_args.iter().map(String::as_str).collect();
    if args == ["self"] {
        return None;
    }
    let listed = if args.is_empty() {
        "none".to_string()
    } else {
        args.join(", ")
    };
    Some(Finding::new(
        ErrorId::InvInvalidArg,
        format!("An invariant expects a single argument 'self', but the arguments are: {listed}"),
        file,
        Some(decl.line),
    ))
}

/// Condition/capture argument names that are not declared by the signature,
/// sorted, with `allowed` reserved names removed first.
fn missing_args<'a>(
    condition_args: &'a BTreeSet<String>,
    sig: &Signature,
    allowed: &[&str],
) -> Vec<&'a str> {
    condition_args
        .iter()
        .map(String::as_str)
        .filter(|a| !allowed.contains(a))
        .filter(|a| !sig.has_param(a))
        .collect()
}
