use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;

use strake_core::types::Finding;
use strake_parsers::walker::FileWalker;

use crate::driver;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("not a file nor a directory: {0}")]
    InvalidPath(PathBuf),
}

/// Result of linting a set of paths: findings keyed by file path. Only files
/// with at least one finding appear; iteration order is path order.
#[derive(Debug, Clone, Default)]
pub struct LintRun {
    pub files: BTreeMap<String, Vec<Finding>>,
}

impl LintRun {
    pub fn total(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

/// Lint the given paths. Files are linted directly; directories are searched
/// recursively for Python sources. Files are driven in parallel — each run
/// is independent — and merged by path so the result is deterministic
/// regardless of completion order.
pub fn check_paths(paths: &[PathBuf]) -> Result<LintRun, LintError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(FileWalker::new(path).walk());
        } else {
            return Err(LintError::InvalidPath(path.clone()));
        }
    }
    files.sort();
    files.dedup();

    let results: Vec<(String, Vec<Finding>)> = files
        .par_iter()
        .map(|path| {
            (
                path.to_string_lossy().to_string(),
                driver::check_file(path),
            )
        })
        .collect();

    let mut run = LintRun::default();
    for (path, findings) in results {
        if !findings.is_empty() {
            run.files.insert(path, findings);
        }
    }
    Ok(run)
}
