//! Python source analysis for strake.
//!
//! - [`analyzer`] — tree-sitter-backed extraction of function/class
//!   declarations and their contract decorations, with best-effort value
//!   resolution (inference failure is a first-class value, never a fault)
//! - [`walker`] — gitignore-aware discovery of Python source files

pub mod analyzer;
pub mod walker;
