use std::collections::BTreeSet;

use strake_core::types::ContractKind;
use strake_parsers::analyzer::{ClassDecl, Decoration, FunctionDecl, ValueRef};

/// Name bound to the return value inside postconditions.
pub const RESULT_ARG: &str = "result";

/// Name bound to the container of pre-call snapshots inside postconditions.
pub const OLD_ARG: &str = "OLD";

/// Reserved keywords of `snapshot`; every other keyword is a named capture.
const SNAPSHOT_KEYWORDS: &[&str] = &["capture", "name", "enabled"];

/// The entity a set of contracts is checked against: ordered parameter names
/// and whether the declared return is anything other than `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<String>,
    pub returns_value: bool,
}

impl Signature {
    pub fn param_set(&self) -> BTreeSet<&str> {
        self.params.iter().map(String::as_str).collect()
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name)
    }
}

/// One extracted contract instance, immutable after extraction.
///
/// `condition_defined` is false when the checking callable is missing or
/// could not be resolved; `capture_defined` plays the same role for
/// snapshots. `condition_args` holds the callable's full parameter-name set,
/// reserved names included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDeclaration {
    pub kind: ContractKind,
    pub line: u32,
    pub condition_defined: bool,
    pub condition_args: BTreeSet<String>,
    pub capture_defined: bool,
    pub capture_args: BTreeSet<String>,
    pub expects_result: bool,
    pub expects_old: bool,
}

impl ContractDeclaration {
    fn new(kind: ContractKind, line: u32) -> Self {
        ContractDeclaration {
            kind,
            line,
            condition_defined: false,
            condition_args: BTreeSet::new(),
            capture_defined: false,
            capture_args: BTreeSet::new(),
            expects_result: false,
            expects_old: false,
        }
    }
}

/// Derive the signature a function's contracts are validated against.
pub fn signature_of(func: &FunctionDecl) -> Signature {
    Signature {
        params: func.params.clone(),
        returns_value: func.returns_value,
    }
}

/// Collect the contract declarations attached to a function or method.
pub fn extract_function(func: &FunctionDecl) -> Vec<ContractDeclaration> {
    func.decorations.iter().flat_map(extract_decoration).collect()
}

/// Collect the contract declarations attached to a class.
pub fn extract_class(class: &ClassDecl) -> Vec<ContractDeclaration> {
    class.decorations.iter().flat_map(extract_decoration).collect()
}

/// Turn one decoration into its contract declarations.
///
/// Non-contract decorations produce nothing. A snapshot decoration is
/// flattened into one declaration per capture entry (the canonical
/// positional/`capture=` entry plus any non-reserved keyword entries); a
/// snapshot with no capture entry at all produces a single declaration with
/// `capture_defined = false`.
fn extract_decoration(deco: &Decoration) -> Vec<ContractDeclaration> {
    let Some(kind) = deco.capability else {
        return Vec::new();
    };

    if kind == ContractKind::Snapshot {
        return extract_snapshot(deco);
    }

    let mut decl = ContractDeclaration::new(kind, deco.line);
    if let Some(ValueRef::Callable { params }) = condition_value(deco) {
        decl.condition_defined = true;
        decl.condition_args = params.iter().cloned().collect();
        if kind == ContractKind::Postcondition {
            decl.expects_result = decl.condition_args.contains(RESULT_ARG);
            decl.expects_old = decl.condition_args.contains(OLD_ARG);
        }
    }
    vec![decl]
}

/// The checking callable of `require`/`ensure`/`invariant`: positional
/// argument 0 or the `condition` keyword. A missing, literal, or unresolved
/// value leaves the declaration malformed.
fn condition_value(deco: &Decoration) -> Option<&ValueRef> {
    if let Some(value) = deco.positional.first() {
        return Some(value);
    }
    deco.keywords
        .iter()
        .find(|(name, _)| name == "condition")
        .map(|(_, value)| value)
}

fn extract_snapshot(deco: &Decoration) -> Vec<ContractDeclaration> {
    let mut captures: Vec<&ValueRef> = Vec::new();

    // Canonical capture: positional argument 0 or `capture=`. Positional
    // argument 1 is the legacy name form, not a capture.
    if let Some(value) = deco.positional.first() {
        captures.push(value);
    } else if let Some((_, value)) = deco
        .keywords
        .iter()
        .find(|(name, _)| name == "capture")
    {
        captures.push(value);
    }

    // Any non-reserved keyword registers a further named capture entry.
    for (name, value) in &deco.keywords {
        if !SNAPSHOT_KEYWORDS.contains(&name.as_str()) {
            captures.push(value);
        }
    }

    if captures.is_empty() {
        return vec![ContractDeclaration::new(ContractKind::Snapshot, deco.line)];
    }

    captures
        .into_iter()
        .map(|value| {
            let mut decl = ContractDeclaration::new(ContractKind::Snapshot, deco.line);
            if let ValueRef::Callable { params } = value {
                decl.capture_defined = true;
                decl.capture_args = params.iter().cloned().collect();
            }
            decl
        })
        .collect()
}
