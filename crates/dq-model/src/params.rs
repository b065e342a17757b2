//! Typed parameter values.
//!
//! Values are serialized untagged so persisted documents carry plain JSON
//! scalars and arrays, and round-trip without changing numeric types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single scalar parsed from user input: integer if it looked like one,
/// float if it converted, otherwise the raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

/// A fully parsed rule parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Scalar>),
    Pairs(Vec<(Scalar, Scalar)>),
}

impl ParamValue {
    /// Numeric view of the value, used for the min/max ordering policy.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(value) => Some(*value as f64),
            ParamValue::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// Parameter-name to value mapping as persisted in rule-set documents.
pub type ParamMap = BTreeMap<String, ParamValue>;
