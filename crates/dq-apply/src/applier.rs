//! Rule application.
//!
//! Walks a rule-set document column group by column group, expands each
//! stored instance into an executor call, persists the resulting suite and
//! moves the artifact into the validations directory. Compatibility with the
//! dataset is checked wholesale up front; a rejected request never touches
//! the executor.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use dq_model::catalog::{self, ColumnArity};
use dq_model::{ColumnGroup, RuleSetDoc};

use crate::executor::{ColumnBinding, ExecutorCall, RuleExecutor};

/// Outcome of one validation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The rule set references columns the dataset does not have. Nothing
    /// was applied.
    Rejected { missing_columns: Vec<String> },
    /// All rules were applied and the suite artifact was persisted.
    Applied { artifact: PathBuf, calls: usize },
}

/// Columns referenced by the rule set but absent from the dataset, sorted.
pub fn missing_dataset_columns(doc: &RuleSetDoc, dataset_columns: &[String]) -> Vec<String> {
    doc.referenced_columns()
        .into_iter()
        .filter(|column| !dataset_columns.iter().any(|have| have == column))
        .collect()
}

/// Apply a rule set to a dataset with the given per-rule confidence.
///
/// `confidence_percent` is the per-rule threshold in `[0, 100]`; every
/// executor call receives it as a `mostly` fraction. After the last call the
/// executor persists its suite (keeping failed rules) and the artifact is
/// moved into `validations_dir`.
pub fn apply_rule_set(
    doc: &RuleSetDoc,
    dataset_columns: &[String],
    confidence_percent: u8,
    executor: &mut dyn RuleExecutor,
    validations_dir: &Path,
) -> Result<ApplyOutcome> {
    if confidence_percent > 100 {
        bail!("confidence must be within 0..=100, got {confidence_percent}");
    }
    let missing = missing_dataset_columns(doc, dataset_columns);
    if !missing.is_empty() {
        info!(set_name = %doc.name, ?missing, "rule set rejected: dataset lacks columns");
        return Ok(ApplyOutcome::Rejected {
            missing_columns: missing,
        });
    }

    let mostly = f64::from(confidence_percent) / 100.0;
    let mut calls = 0usize;
    for (key, instances) in &doc.expectations {
        let group = ColumnGroup::from_key(key);
        for instance in instances {
            let call = ExecutorCall {
                rule: instance.rule,
                binding: bind_columns(instance.rule, &group)?,
                parameters: instance.parameters.clone(),
                mostly,
            };
            debug!(rule = %instance.rule, group = %group, "applying rule");
            executor.apply_rule(call)?;
            calls += 1;
        }
    }

    let artifact = executor.save_suite(false)?;
    let artifact = move_artifact(&artifact, validations_dir)?;
    info!(set_name = %doc.name, calls, artifact = %artifact.display(), "rule set applied");
    Ok(ApplyOutcome::Applied { artifact, calls })
}

/// Re-inject the column binding stored in the group key, according to the
/// rule's arity. A group key that does not match the arity means the
/// document was corrupted outside the store.
fn bind_columns(rule: dq_model::RuleId, group: &ColumnGroup) -> Result<ColumnBinding> {
    let columns = group.columns();
    match catalog::describe(rule).arity {
        ColumnArity::One => match columns {
            [column] => Ok(ColumnBinding::Single(column.clone())),
            _ => bail!("rule {rule} expects one column, group key holds {}", columns.len()),
        },
        ColumnArity::Two => match columns {
            [first, second] => Ok(ColumnBinding::Pair(first.clone(), second.clone())),
            _ => bail!("rule {rule} expects two columns, group key holds {}", columns.len()),
        },
        ColumnArity::Any => Ok(ColumnBinding::Many(columns.to_vec())),
    }
}

fn move_artifact(artifact: &Path, validations_dir: &Path) -> Result<PathBuf> {
    let file_name = artifact
        .file_name()
        .with_context(|| format!("artifact path has no file name: {}", artifact.display()))?;
    let target = validations_dir.join(file_name);
    if target.as_path() != artifact {
        std::fs::rename(artifact, &target).with_context(|| {
            format!(
                "failed to move artifact {} to {}",
                artifact.display(),
                target.display()
            )
        })?;
    }
    Ok(target)
}
