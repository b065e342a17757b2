mod applier;
mod executor;
mod recorder;

pub use applier::{ApplyOutcome, apply_rule_set, missing_dataset_columns};
pub use executor::{ColumnBinding, ExecutorCall, RuleExecutor};
pub use recorder::JsonSuiteRecorder;
