//! Core types for strake.
//!
//! This crate provides the data structures shared across all strake crates:
//! - [`types`] — the error-id taxonomy, findings, and contract kinds

pub mod types;
