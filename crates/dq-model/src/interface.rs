//! Interface-name codec.
//!
//! An interface name is the compact display string shown in checklists,
//! `"<rule display name> over <col1>, <col2>"`. It decodes back to the
//! (rule id, column list) pair used internally, and drives duplicate
//! detection at checklist granularity.

use crate::catalog::{self, RuleId};
use crate::columns::ColumnGroup;
use crate::error::{DqError, Result};

/// Conjunction token between the rule display name and its columns.
pub const INTERFACE_NAME_DIVIDER: &str = "over";

/// Build the display string for a rule bound to the given columns.
pub fn encode_interface_name(display_name: &str, columns: &[String]) -> String {
    format!(
        "{display_name} {INTERFACE_NAME_DIVIDER} {}",
        columns.join(", ")
    )
}

/// Split an interface name back into its rule id and column list.
///
/// The divider is expected exactly once; the rule is resolved through the
/// single- or multi-column catalog depending on how many columns follow it.
/// Unlike the catalog lookups, an unknown display name here is an input
/// error, not a programmer error: removal requests arrive as free text.
pub fn decode_interface_name(interface_name: &str) -> Result<(RuleId, Vec<String>)> {
    let divider = format!(" {INTERFACE_NAME_DIVIDER} ");
    let parts: Vec<&str> = interface_name.split(&divider).collect();
    let [display_name, column_part] = parts[..] else {
        return Err(DqError::InterfaceName(interface_name.to_string()));
    };
    let columns: Vec<String> = column_part.split(", ").map(str::to_string).collect();
    let rules = if columns.len() == 1 {
        catalog::SINGLE_COLUMN_RULES
    } else {
        catalog::MULTI_COLUMN_RULES
    };
    let descriptor = rules
        .iter()
        .find(|descriptor| descriptor.display_name == display_name)
        .ok_or_else(|| DqError::InterfaceName(interface_name.to_string()))?;
    Ok((descriptor.id, columns))
}

/// Duplicate check at interface-name granularity.
///
/// Two names are duplicates when they resolve to the same rule id and their
/// column sets are equal as unordered sets, so `"R over A, B"` and
/// `"R over B, A"` collide. This matches the store's order-agnostic key
/// canonicalization and keeps checklists free of visually distinct twins.
pub fn is_duplicate_interface_name(candidate: &str, existing: &[String]) -> Result<bool> {
    let (candidate_rule, candidate_columns) = decode_interface_name(candidate)?;
    let candidate_group = ColumnGroup::new(candidate_columns);
    for name in existing {
        let (rule, columns) = decode_interface_name(name)?;
        if rule == candidate_rule && ColumnGroup::new(columns).set_eq(&candidate_group) {
            return Ok(true);
        }
    }
    Ok(false)
}
