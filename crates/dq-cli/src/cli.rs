//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Define, store and apply data-quality rule sets over tabular datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Data directory root (default: DQ_STUDIO_DIR or ./dq_studio).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty rule set.
    Create(CreateArgs),

    /// List stored rule sets.
    List(ListArgs),

    /// Add a single-column rule to a rule set.
    AddSingle(AddSingleArgs),

    /// Add a multi-column rule to a rule set.
    AddMulti(AddMultiArgs),

    /// Remove rules from a rule set by their display names.
    Remove(RemoveArgs),

    /// Delete rule sets that hold no rules.
    Prune,

    /// Apply a rule set to a CSV dataset.
    Apply(ApplyArgs),
}

#[derive(Parser)]
pub struct CreateArgs {
    /// Rule-set name (alphanumeric and underscores).
    #[arg(value_name = "SET_NAME")]
    pub set_name: String,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Also list every rule inside each set.
    #[arg(long = "rules")]
    pub rules: bool,
}

#[derive(Parser)]
pub struct AddSingleArgs {
    /// Rule-set name.
    #[arg(value_name = "SET_NAME")]
    pub set_name: String,

    /// Rule display name, e.g. "Values to be between".
    #[arg(long = "rule", value_name = "NAME")]
    pub rule: String,

    /// Table column the rule applies to.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: String,

    /// Expected value length (digits only).
    #[arg(long = "length", value_name = "LENGTH")]
    pub length: Option<String>,

    /// Lower bound for "Values to be between".
    #[arg(long = "min", value_name = "MIN")]
    pub min: Option<String>,

    /// Upper bound for "Values to be between".
    #[arg(long = "max", value_name = "MAX")]
    pub max: Option<String>,

    /// Expected type: int, bool, float or str.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: Option<String>,

    /// Comma-separated value set, e.g. "1, 2.5, red".
    #[arg(long = "values", value_name = "VALUES")]
    pub values: Option<String>,
}

#[derive(Parser)]
pub struct AddMultiArgs {
    /// Rule-set name.
    #[arg(value_name = "SET_NAME")]
    pub set_name: String,

    /// Rule display name, e.g. "Pairs of values to be in set".
    #[arg(long = "rule", value_name = "NAME")]
    pub rule: String,

    /// First column for two-column rules.
    #[arg(long = "column-a", value_name = "COLUMN")]
    pub column_a: Option<String>,

    /// Second column for two-column rules.
    #[arg(long = "column-b", value_name = "COLUMN")]
    pub column_b: Option<String>,

    /// Comma-separated column list for any-column-count rules.
    #[arg(long = "columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Compare with greater-or-equal instead of strictly greater.
    #[arg(long = "or-equal")]
    pub or_equal: bool,

    /// Bracketed pair list, e.g. "[1,2],[3,4]".
    #[arg(long = "values", value_name = "PAIRS")]
    pub values: Option<String>,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Rule-set name.
    #[arg(value_name = "SET_NAME")]
    pub set_name: String,

    /// Rule display names as printed by `list --rules`,
    /// e.g. "Values to not be null over email".
    #[arg(value_name = "RULE", required = true)]
    pub rules: Vec<String>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Rule-set name.
    #[arg(value_name = "SET_NAME")]
    pub set_name: String,

    /// Path to the CSV dataset.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Per-rule confidence threshold in percent.
    #[arg(long = "confidence", value_name = "PERCENT", default_value_t = 100)]
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
