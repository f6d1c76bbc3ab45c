use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Recursively discovers Python source files beneath a root directory,
/// honoring `.gitignore` and a `.strakeignore` custom ignore file.
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the root and return the Python files found, sorted by path so
    /// runs are deterministic regardless of filesystem order.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(".strakeignore")
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    eprintln!("strake: warning: {err}");
                    continue;
                }
            };

            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if is_python_source(&path) {
                files.push(path);
            }
        }

        files.sort();
        files
    }
}

pub fn is_python_source(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("py" | "pyi")
    )
}
