//! Suite-recording executor.
//!
//! Accumulates every applied rule as an expectation configuration and
//! persists the suite as a JSON artifact. Evaluation against actual data is
//! left to the real executor behind the same trait; this implementation
//! covers the persistence half of the contract and backs the CLI and tests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value, json};

use dq_model::catalog::{PARAM_COLUMN, PARAM_COLUMN_A, PARAM_COLUMN_B, PARAM_COLUMN_LIST, PARAM_MOSTLY};
use dq_model::RuleId;

use crate::executor::{ColumnBinding, ExecutorCall, RuleExecutor};

const SUITE_SCHEMA: &str = "dq-studio.expectation-suite";
const SUITE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct SuiteEntry {
    expectation_type: RuleId,
    kwargs: Map<String, Value>,
}

/// `RuleExecutor` that records calls and writes the suite JSON on save.
#[derive(Debug)]
pub struct JsonSuiteRecorder {
    suite_name: String,
    output_dir: PathBuf,
    entries: Vec<SuiteEntry>,
}

impl JsonSuiteRecorder {
    pub fn new(suite_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            suite_name: suite_name.into(),
            output_dir: output_dir.into(),
            entries: Vec::new(),
        }
    }

    fn kwargs_for(call: &ExecutorCall) -> Result<Map<String, Value>> {
        let mut kwargs = Map::new();
        match &call.binding {
            ColumnBinding::Single(column) => {
                kwargs.insert(PARAM_COLUMN.to_string(), json!(column));
            }
            ColumnBinding::Pair(first, second) => {
                kwargs.insert(PARAM_COLUMN_A.to_string(), json!(first));
                kwargs.insert(PARAM_COLUMN_B.to_string(), json!(second));
            }
            ColumnBinding::Many(columns) => {
                kwargs.insert(PARAM_COLUMN_LIST.to_string(), json!(columns));
            }
        }
        for (name, value) in &call.parameters {
            let value = serde_json::to_value(value)
                .with_context(|| format!("failed to serialize parameter {name}"))?;
            kwargs.insert(name.clone(), value);
        }
        kwargs.insert(PARAM_MOSTLY.to_string(), json!(call.mostly));
        Ok(kwargs)
    }
}

impl RuleExecutor for JsonSuiteRecorder {
    fn apply_rule(&mut self, call: ExecutorCall) -> Result<()> {
        let kwargs = Self::kwargs_for(&call)?;
        self.entries.push(SuiteEntry {
            expectation_type: call.rule,
            kwargs,
        });
        Ok(())
    }

    fn save_suite(&mut self, discard_failed_expectations: bool) -> Result<PathBuf> {
        // Without evaluation results there is nothing to discard; the flag is
        // recorded so downstream readers see the persistence mode.
        let payload = json!({
            "schema": SUITE_SCHEMA,
            "schema_version": SUITE_SCHEMA_VERSION,
            "expectation_suite_name": self.suite_name,
            "generated_at": Utc::now().to_rfc3339(),
            "discard_failed_expectations": discard_failed_expectations,
            "expectations": &self.entries,
        });
        let path = self.output_dir.join(format!("{}.json", self.suite_name));
        let json = serde_json::to_string_pretty(&payload)?;
        std::fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("failed to write suite {}", path.display()))?;
        Ok(path)
    }
}
