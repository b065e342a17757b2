//! Rule executor interface.
//!
//! The executor is the external validation engine: one named rule method per
//! rule id, called with keyword-style parameters. The applier talks to it
//! through one typed call value per rule instance instead of a stringly
//! dispatched attribute lookup, so unknown rule ids cannot reach it.

use std::path::PathBuf;

use anyhow::Result;

use dq_model::{ParamMap, RuleId};

/// Column binding of one executor call, mirroring the executor's
/// `column` / `column_A` + `column_B` / `column_list` keyword convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBinding {
    Single(String),
    Pair(String, String),
    Many(Vec<String>),
}

/// One fully resolved executor invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorCall {
    pub rule: RuleId,
    pub binding: ColumnBinding,
    /// Stored rule parameters, cloned from the document.
    pub parameters: ParamMap,
    /// Confidence fraction in `[0, 1]` under the executor's "mostly"
    /// convention.
    pub mostly: f64,
}

/// External rule executor capability.
///
/// Implementations accumulate applied rules into a suite and persist it on
/// demand; the statistical pass/fail evaluation itself lives behind this
/// boundary.
pub trait RuleExecutor {
    fn apply_rule(&mut self, call: ExecutorCall) -> Result<()>;

    /// Persist the accumulated suite and return the artifact path. With
    /// `discard_failed_expectations` false, failing rules remain part of the
    /// persisted definition.
    fn save_suite(&mut self, discard_failed_expectations: bool) -> Result<PathBuf>;
}
