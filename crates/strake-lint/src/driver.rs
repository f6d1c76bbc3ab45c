use std::fs;
use std::path::Path;

use strake_core::types::{ErrorId, Finding};
use strake_parsers::analyzer::{self, Decl, ParseError};

use crate::extract;
use crate::rules;

/// Terminal outcome of driving one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file carries the disable directive; nothing is reported.
    Disabled,
    /// Reading or decoding failed; exactly one `unreadable` finding.
    ReadFailed(Finding),
    /// Parsing failed; exactly one `invalid-syntax` finding.
    ParseFailed(Finding),
    /// Extraction and rule checking ran over every declaration.
    Checked(Vec<Finding>),
}

impl FileOutcome {
    pub fn into_findings(self) -> Vec<Finding> {
        match self {
            FileOutcome::Disabled => Vec::new(),
            FileOutcome::ReadFailed(finding) | FileOutcome::ParseFailed(finding) => {
                vec![finding]
            }
            FileOutcome::Checked(findings) => findings,
        }
    }
}

/// A line that opts the whole file out of linting: `# strake: disabled`,
/// with arbitrary whitespace between the tokens.
fn is_disable_directive(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix('#') else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix("strake") else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix(':') else {
        return false;
    };
    rest.trim() == "disabled"
}

pub fn is_disabled(text: &str) -> bool {
    text.lines().any(is_disable_directive)
}

/// Drive one file through read, directive scan, parse, and check.
/// Every failure is terminal for this file only; nothing is retried.
pub fn run_file(path: &Path) -> FileOutcome {
    let file = path.to_string_lossy().to_string();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            return FileOutcome::ReadFailed(Finding::new(
                ErrorId::Unreadable,
                format!("Failed to read the file: {err}"),
                file,
                None,
            ));
        }
    };
    run_source(&file, &text)
}

/// The read-free tail of [`run_file`]: a pure function of the file content,
/// so driving the same text twice yields identical findings.
pub fn run_source(file: &str, text: &str) -> FileOutcome {
    if is_disabled(text) {
        return FileOutcome::Disabled;
    }

    let module = match analyzer::parse_module(text) {
        Ok(module) => module,
        Err(ParseError::Syntax { line }) => {
            return FileOutcome::ParseFailed(Finding::new(
                ErrorId::InvalidSyntax,
                "invalid syntax",
                file,
                Some(line),
            ));
        }
        Err(err) => {
            return FileOutcome::ReadFailed(Finding::new(
                ErrorId::Unreadable,
                format!("Failed to parse the file: {err}"),
                file,
                None,
            ));
        }
    };

    let mut findings = Vec::new();
    for decl in &module.decls {
        visit(decl, file, &mut findings);
    }
    // Source order by line, then taxonomy order for stability at the same line.
    findings.sort_by(|a, b| {
        (a.line.unwrap_or(0), a.id).cmp(&(b.line.unwrap_or(0), b.id))
    });
    FileOutcome::Checked(findings)
}

pub fn check_file(path: &Path) -> Vec<Finding> {
    run_file(path).into_findings()
}

fn visit(decl: &Decl, file: &str, out: &mut Vec<Finding>) {
    match decl {
        Decl::Function(func) => {
            let sig = extract::signature_of(func);
            let decls = extract::extract_function(func);
            out.extend(rules::check_function(&sig, &decls, file, func.line));
            for nested in &func.nested {
                visit(nested, file, out);
            }
        }
        Decl::Class(class) => {
            let decls = extract::extract_class(class);
            out.extend(rules::check_class(&decls, file));
            for nested in &class.body {
                visit(nested, file, out);
            }
        }
    }
}
