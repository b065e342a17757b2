//! Rule-set documents.
//!
//! One document per named rule set, mapping column-group keys to ordered
//! lists of rule instances. The wire format is fixed: `expectation_set_name`,
//! `last_edited`, and `expectations` keyed by group key.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::RuleId;
use crate::columns::ColumnGroup;
use crate::params::ParamMap;

/// One rule bound to a column group: identifier plus its stored parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInstance {
    #[serde(rename = "expectation_type")]
    pub rule: RuleId,
    pub parameters: ParamMap,
}

impl RuleInstance {
    pub fn new(rule: RuleId, parameters: ParamMap) -> Self {
        Self { rule, parameters }
    }
}

/// A named, timestamped collection of rules grouped by column-group key.
///
/// Invariant: every present group key owns a non-empty rule list. Mutating
/// operations remove a key as soon as its list drains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetDoc {
    #[serde(rename = "expectation_set_name")]
    pub name: String,
    pub last_edited: String,
    pub expectations: BTreeMap<String, Vec<RuleInstance>>,
}

impl RuleSetDoc {
    pub fn empty(name: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_edited: timestamp.into(),
            expectations: BTreeMap::new(),
        }
    }

    /// True when the document holds no rules at all.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Group key to store `columns` under.
    ///
    /// For order-agnostic groupings, a set-equal key already present in the
    /// document wins over the incoming order, so the same columns never
    /// appear under two differently-ordered keys. Two-column rules keep the
    /// order the user gave.
    pub fn canonical_key(&self, columns: &ColumnGroup, order_agnostic: bool) -> String {
        if order_agnostic {
            for existing in self.expectations.keys() {
                if ColumnGroup::from_key(existing).set_eq(columns) {
                    return existing.clone();
                }
            }
        }
        columns.key()
    }

    /// Append a rule instance under a group key.
    pub fn push_rule(&mut self, key: String, instance: RuleInstance) {
        self.expectations.entry(key).or_default().push(instance);
    }

    /// Exact content match against the instances stored under `key`.
    pub fn contains_instance(&self, key: &str, instance: &RuleInstance) -> bool {
        self.expectations
            .get(key)
            .is_some_and(|instances| instances.contains(instance))
    }

    /// Union of all columns referenced across all group keys.
    pub fn referenced_columns(&self) -> BTreeSet<String> {
        self.expectations
            .keys()
            .flat_map(|key| ColumnGroup::from_key(key).columns().to_vec())
            .collect()
    }

    /// Total number of rule instances in the document.
    pub fn rule_count(&self) -> usize {
        self.expectations.values().map(Vec::len).sum()
    }
}

/// A rule-set name is valid when non-empty and alphanumeric plus underscores.
pub fn is_valid_set_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
