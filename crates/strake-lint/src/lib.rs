//! Contract-lint engine for strake.
//!
//! Validates icontract-style decorators against the signatures they decorate
//! and produces findings:
//! - `no-condition`: a contract decorator lacks its checking callable
//! - `pre-invalid-arg`: precondition references arguments the function does not declare
//! - `snapshot-invalid-arg`: snapshot capture references unknown arguments or more than one
//! - `snapshot-wo-post`: snapshot on a function without any postcondition
//! - `snapshot-wo-capture`: snapshot decorator lacks its capture callable
//! - `post-invalid-arg`: postcondition references arguments the function does not declare
//! - `post-result-none`: postcondition expects a result from a `-> None` function
//! - `post-result-conflict` / `post-old-conflict`: function arguments shadow `result` / `OLD`
//! - `inv-invalid-arg`: invariant condition takes anything other than exactly `self`
//!
//! File-level faults (`unreadable`, `invalid-syntax`) are produced by the
//! [`driver`], one finding per failed file, and never abort the run.

pub mod driver;
pub mod extract;
pub mod paths;
pub mod rules;
