//! Static rule catalog.
//!
//! Two parallel catalogs exist: rules applied to a single table column and
//! rules applied across several columns. Catalog lookups by display name are
//! only ever fed names the catalog itself produced, so an unknown name is a
//! programmer error and panics rather than returning a recoverable error.

use serde::{Deserialize, Serialize};

/// Closed set of rule identifiers.
///
/// The wire spelling of each identifier matches the executor's method naming
/// convention and is what ends up in persisted rule-set documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "expect_column_values_to_be_unique")]
    ValuesUnique,
    #[serde(rename = "expect_column_values_to_not_be_null")]
    ValuesNotNull,
    #[serde(rename = "expect_column_values_to_be_in_set")]
    ValuesInSet,
    #[serde(rename = "expect_column_values_to_be_of_type")]
    ValuesOfType,
    #[serde(rename = "expect_column_values_to_be_between")]
    ValuesBetween,
    #[serde(rename = "expect_column_value_lengths_to_equal")]
    ValueLengthsEqual,
    #[serde(rename = "expect_multicolumn_values_to_be_unique")]
    MulticolumnUnique,
    #[serde(rename = "expect_column_pair_values_a_to_be_greater_than_b")]
    PairGreaterThan,
    #[serde(rename = "expect_column_pair_values_to_be_in_set")]
    PairValuesInSet,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ValuesUnique => "expect_column_values_to_be_unique",
            RuleId::ValuesNotNull => "expect_column_values_to_not_be_null",
            RuleId::ValuesInSet => "expect_column_values_to_be_in_set",
            RuleId::ValuesOfType => "expect_column_values_to_be_of_type",
            RuleId::ValuesBetween => "expect_column_values_to_be_between",
            RuleId::ValueLengthsEqual => "expect_column_value_lengths_to_equal",
            RuleId::MulticolumnUnique => "expect_multicolumn_values_to_be_unique",
            RuleId::PairGreaterThan => "expect_column_pair_values_a_to_be_greater_than_b",
            RuleId::PairValuesInSet => "expect_column_pair_values_to_be_in_set",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a single rule parameter, driving how raw user input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One of the closed type set (`int`, `bool`, `float`, `str`).
    TypeName,
    /// Digits-only string, kept as text for wire compatibility.
    IntegerText,
    /// Comma-separated scalar list.
    ValueList,
    /// Single float bound of a min/max range.
    Range,
    /// One column name, bound from the group key at apply time.
    ColumnName,
    /// Variable-length column list, bound from the group key at apply time.
    ColumnList,
    /// Bracketed pair list, e.g. `[1,2],[3,4]`.
    ValuePairList,
    /// Checkbox-style flag; present selection means true, never missing.
    Toggle,
}

/// How many table columns a rule binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnArity {
    One,
    Two,
    Any,
}

// Parameter names shared with the executor's keyword convention.
pub const PARAM_TYPE: &str = "type_";
pub const PARAM_LENGTH: &str = "value";
pub const PARAM_VALUE_SET: &str = "value_set";
pub const PARAM_MIN_VALUE: &str = "min_value";
pub const PARAM_MAX_VALUE: &str = "max_value";
pub const PARAM_VALUE_PAIRS: &str = "value_pairs_set";
pub const PARAM_OR_EQUAL: &str = "or_equal";
pub const PARAM_COLUMN: &str = "column";
pub const PARAM_COLUMN_A: &str = "column_A";
pub const PARAM_COLUMN_B: &str = "column_B";
pub const PARAM_COLUMN_LIST: &str = "column_list";
pub const PARAM_MOSTLY: &str = "mostly";

/// Immutable description of one rule: identity, display text, parameter
/// schema and column arity.
#[derive(Debug, Clone, Copy)]
pub struct RuleDescriptor {
    pub id: RuleId,
    pub display_name: &'static str,
    /// Ordered parameter schema, including column-binding parameters.
    pub parameters: &'static [(&'static str, ParamKind)],
    pub arity: ColumnArity,
}

impl RuleDescriptor {
    /// Parameters that are persisted in rule-set documents. Column bindings
    /// are excluded: those live in the column-group key and are re-injected
    /// when the rule is applied.
    pub fn stored_parameters(&self) -> impl Iterator<Item = (&'static str, ParamKind)> {
        self.parameters
            .iter()
            .copied()
            .filter(|(_, kind)| !matches!(kind, ParamKind::ColumnName | ParamKind::ColumnList))
    }
}

/// Rules applied to exactly one table column.
pub const SINGLE_COLUMN_RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        id: RuleId::ValuesUnique,
        display_name: "Values to be unique",
        parameters: &[],
        arity: ColumnArity::One,
    },
    RuleDescriptor {
        id: RuleId::ValuesNotNull,
        display_name: "Values to not be null",
        parameters: &[],
        arity: ColumnArity::One,
    },
    RuleDescriptor {
        id: RuleId::ValuesInSet,
        display_name: "Values to be in set",
        parameters: &[(PARAM_VALUE_SET, ParamKind::ValueList)],
        arity: ColumnArity::One,
    },
    RuleDescriptor {
        id: RuleId::ValuesOfType,
        display_name: "Values to be of type",
        parameters: &[(PARAM_TYPE, ParamKind::TypeName)],
        arity: ColumnArity::One,
    },
    RuleDescriptor {
        id: RuleId::ValuesBetween,
        display_name: "Values to be between",
        parameters: &[
            (PARAM_MIN_VALUE, ParamKind::Range),
            (PARAM_MAX_VALUE, ParamKind::Range),
        ],
        arity: ColumnArity::One,
    },
    RuleDescriptor {
        id: RuleId::ValueLengthsEqual,
        display_name: "Value lengths to equal",
        parameters: &[(PARAM_LENGTH, ParamKind::IntegerText)],
        arity: ColumnArity::One,
    },
];

/// Rules applied across several table columns.
///
/// Display names must never contain the interface-name divider ("over") as a
/// standalone word, or interface-name decoding breaks.
pub const MULTI_COLUMN_RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        id: RuleId::MulticolumnUnique,
        display_name: "Values to be unique",
        parameters: &[(PARAM_COLUMN_LIST, ParamKind::ColumnList)],
        arity: ColumnArity::Any,
    },
    RuleDescriptor {
        id: RuleId::PairGreaterThan,
        display_name: "Column A values to be greater than column B",
        parameters: &[
            (PARAM_COLUMN_A, ParamKind::ColumnName),
            (PARAM_COLUMN_B, ParamKind::ColumnName),
            (PARAM_OR_EQUAL, ParamKind::Toggle),
        ],
        arity: ColumnArity::Two,
    },
    RuleDescriptor {
        id: RuleId::PairValuesInSet,
        display_name: "Pairs of values to be in set",
        parameters: &[
            (PARAM_COLUMN_A, ParamKind::ColumnName),
            (PARAM_COLUMN_B, ParamKind::ColumnName),
            (PARAM_VALUE_PAIRS, ParamKind::ValuePairList),
        ],
        arity: ColumnArity::Two,
    },
];

/// Display names of rules restricted to numeric columns.
const NUMERIC_ONLY_RULES: &[&str] = &["Values to be between"];

/// Display names of rules restricted to non-numeric columns.
const NON_NUMERIC_ONLY_RULES: &[&str] = &["Value lengths to equal"];

/// Look up a rule descriptor by identifier.
pub fn describe(id: RuleId) -> &'static RuleDescriptor {
    SINGLE_COLUMN_RULES
        .iter()
        .chain(MULTI_COLUMN_RULES)
        .find(|descriptor| descriptor.id == id)
        .unwrap_or_else(|| panic!("rule id missing from catalog: {id}"))
}

/// Ordered parameter schema for a rule.
pub fn parameters_of(id: RuleId) -> &'static [(&'static str, ParamKind)] {
    describe(id).parameters
}

/// Look up a single-column rule by display name.
///
/// # Panics
///
/// Panics on a display name the catalog does not know; the UI layer only ever
/// submits catalog-valid names.
pub fn single_column_rule(display_name: &str) -> &'static RuleDescriptor {
    SINGLE_COLUMN_RULES
        .iter()
        .find(|descriptor| descriptor.display_name == display_name)
        .unwrap_or_else(|| panic!("unknown single-column rule: {display_name}"))
}

/// Look up a multi-column rule by display name.
///
/// # Panics
///
/// Panics on a display name the catalog does not know.
pub fn multi_column_rule(display_name: &str) -> &'static RuleDescriptor {
    MULTI_COLUMN_RULES
        .iter()
        .find(|descriptor| descriptor.display_name == display_name)
        .unwrap_or_else(|| panic!("unknown multi-column rule: {display_name}"))
}

/// True unless the rule is explicitly restricted to non-numeric columns.
pub fn is_numeric_compatible(display_name: &str) -> bool {
    !NON_NUMERIC_ONLY_RULES.contains(&display_name)
}

/// True unless the rule is explicitly restricted to numeric columns.
pub fn is_non_numeric_compatible(display_name: &str) -> bool {
    !NUMERIC_ONLY_RULES.contains(&display_name)
}

/// Multi-column rules that bind exactly two columns.
pub fn two_column_rules() -> impl Iterator<Item = &'static RuleDescriptor> {
    MULTI_COLUMN_RULES
        .iter()
        .filter(|descriptor| descriptor.arity == ColumnArity::Two)
}

/// Multi-column rules that bind any number of columns.
pub fn any_column_count_rules() -> impl Iterator<Item = &'static RuleDescriptor> {
    MULTI_COLUMN_RULES
        .iter()
        .filter(|descriptor| descriptor.arity == ColumnArity::Any)
}
