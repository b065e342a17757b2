//! Parameter parsing.
//!
//! Converts raw user input into typed parameter values, one policy per
//! parameter kind. Parsing is pure and deterministic; `None` always means
//! "invalid, do not proceed" and is the only failure signal. Surfacing it
//! to the user is the caller's concern.

mod pairlist;

pub use pairlist::matches_pair_grammar;

use dq_model::{ParamKind, ParamValue, Scalar};

/// Closed set of type names accepted by the type-enum parameter.
pub const SUPPORTED_TYPE_NAMES: &[&str] = &["int", "bool", "float", "str"];

/// Raw input as handed over by the input widgets: free text, or the selected
/// items of a checklist/dropdown.
#[derive(Debug, Clone, Copy)]
pub enum RawValue<'a> {
    Text(&'a str),
    Selection(&'a [String]),
}

/// Parser policy switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Convert the digits-only length parameter to an integer instead of
    /// keeping the raw string. Off by default: historical consumers expect
    /// the string form on the wire.
    pub convert_length_to_int: bool,
}

/// Parse one raw value according to its parameter kind.
///
/// Returns `None` for invalid input or a raw-value shape that does not match
/// the kind (text where a selection is expected, or vice versa).
pub fn parse(kind: ParamKind, raw: RawValue<'_>, options: ParserOptions) -> Option<ParamValue> {
    match (kind, raw) {
        (ParamKind::TypeName, RawValue::Text(value)) => SUPPORTED_TYPE_NAMES
            .contains(&value)
            .then(|| ParamValue::Text(value.to_string())),
        (ParamKind::IntegerText, RawValue::Text(value)) => {
            if !is_digits(value) {
                return None;
            }
            if options.convert_length_to_int {
                value.parse::<i64>().ok().map(ParamValue::Int)
            } else {
                Some(ParamValue::Text(value.to_string()))
            }
        }
        (ParamKind::ValueList, RawValue::Text(value)) => {
            let cleaned: String = value.chars().filter(|ch| *ch != ' ').collect();
            // Duplicates are intentionally kept at this layer.
            Some(ParamValue::List(
                cleaned.split(',').map(scalar_from_token).collect(),
            ))
        }
        (ParamKind::Range, RawValue::Text(value)) => {
            value.replace(',', ".").parse::<f64>().ok().map(ParamValue::Float)
        }
        (ParamKind::ColumnName, RawValue::Text(value)) => {
            (!value.is_empty()).then(|| ParamValue::Text(value.to_string()))
        }
        (ParamKind::ColumnList, RawValue::Selection(columns)) => {
            (!columns.is_empty()).then(|| {
                ParamValue::List(
                    columns
                        .iter()
                        .map(|column| Scalar::Text(column.clone()))
                        .collect(),
                )
            })
        }
        (ParamKind::ValuePairList, RawValue::Text(value)) => {
            pairlist::parse_pair_list(value).map(ParamValue::Pairs)
        }
        // An unchecked checkbox list yields false, not a missing value.
        (ParamKind::Toggle, RawValue::Selection(items)) => {
            Some(ParamValue::Bool(!items.is_empty()))
        }
        _ => None,
    }
}

/// Min/max ordering policy applied by callers after both bounds parse:
/// a pair with min greater than max is rejected as a whole.
pub fn range_is_ordered(min: &ParamValue, max: &ParamValue) -> bool {
    match (min.as_f64(), max.as_f64()) {
        (Some(min), Some(max)) => min <= max,
        _ => false,
    }
}

/// Integer-looking predicate: non-empty, ASCII digits only. Signs and
/// decimal points disqualify, matching the historical numeric-string check.
fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

/// Scalar conversion shared by list and pair parsing: integer when the token
/// is digits-only, float when it converts, otherwise the raw text.
pub(crate) fn scalar_from_token(token: &str) -> Scalar {
    if is_digits(token)
        && let Ok(value) = token.parse::<i64>()
    {
        return Scalar::Int(value);
    }
    match token.parse::<f64>() {
        Ok(value) => Scalar::Float(value),
        Err(_) => Scalar::Text(token.to_string()),
    }
}
