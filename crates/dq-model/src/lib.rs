pub mod catalog;
pub mod columns;
pub mod error;
pub mod interface;
pub mod params;
pub mod set;

pub use catalog::{ColumnArity, ParamKind, RuleDescriptor, RuleId};
pub use columns::{ColumnGroup, GROUP_KEY_SEPARATOR};
pub use error::{DqError, Result};
pub use interface::{
    INTERFACE_NAME_DIVIDER, decode_interface_name, encode_interface_name,
    is_duplicate_interface_name,
};
pub use params::{ParamMap, ParamValue, Scalar};
pub use set::{RuleInstance, RuleSetDoc, is_valid_set_name};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_instance_serializes_with_wire_names() {
        let instance = RuleInstance::new(RuleId::ValuesNotNull, ParamMap::new());
        let json = serde_json::to_string(&instance).expect("serialize instance");
        assert_eq!(
            json,
            r#"{"expectation_type":"expect_column_values_to_not_be_null","parameters":{}}"#
        );
    }

    #[test]
    fn param_values_round_trip_without_type_drift() {
        let mut params = ParamMap::new();
        params.insert("min_value".to_string(), ParamValue::Float(0.0));
        params.insert(
            "value_set".to_string(),
            ParamValue::List(vec![Scalar::Int(1), Scalar::Text("x".to_string())]),
        );
        let json = serde_json::to_string(&params).expect("serialize params");
        let round: ParamMap = serde_json::from_str(&json).expect("deserialize params");
        assert_eq!(round, params);
    }

    #[test]
    fn empty_doc_reports_empty() {
        let doc = RuleSetDoc::empty("checks", "2026-01-01 00:00:00");
        assert!(doc.is_empty());
        assert_eq!(doc.rule_count(), 0);
    }
}
