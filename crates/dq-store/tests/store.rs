//! Store behavior against a temporary data directory.

use dq_model::{ColumnGroup, ParamMap, ParamValue, RuleId, Scalar};
use dq_store::{RuleSetStore, StoreError};
use tempfile::TempDir;

fn open_store() -> (TempDir, RuleSetStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = RuleSetStore::open(dir.path()).expect("open store");
    (dir, store)
}

fn between_params(min: f64, max: f64) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("min_value".to_string(), ParamValue::Float(min));
    params.insert("max_value".to_string(), ParamValue::Float(max));
    params
}

#[test]
fn create_empty_is_idempotent() {
    let (_dir, store) = open_store();
    assert!(store.create_empty("quality_checks").expect("first create"));
    assert!(!store.create_empty("quality_checks").expect("second create"));
}

#[test]
fn invalid_set_names_are_rejected() {
    let (_dir, store) = open_store();
    for name in ["", "bad name", "bad-name", "bad.name"] {
        assert!(matches!(
            store.create_empty(name),
            Err(StoreError::InvalidName { .. })
        ));
    }
    assert!(store.create_empty("ok_name_3").expect("valid name"));
}

#[test]
fn single_column_rule_lands_under_column_key() {
    let (_dir, store) = open_store();
    store
        .add_single_column("quality_checks", "email", RuleId::ValuesNotNull, ParamMap::new())
        .expect("add rule");

    let doc = store.load("quality_checks").expect("load");
    let instances = doc.expectations.get("email").expect("email group");
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].rule, RuleId::ValuesNotNull);
    assert!(instances[0].parameters.is_empty());

    // Wire format check straight off the disk.
    let raw = std::fs::read_to_string(store.set_path("quality_checks")).expect("read file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(
        json["expectations"]["email"][0]["expectation_type"],
        "expect_column_values_to_not_be_null"
    );
    assert_eq!(json["expectation_set_name"], "quality_checks");
}

#[test]
fn between_rule_stores_float_bounds() {
    let (_dir, store) = open_store();
    store
        .add_single_column(
            "quality_checks",
            "age",
            RuleId::ValuesBetween,
            between_params(0.0, 120.0),
        )
        .expect("add rule");

    let raw = std::fs::read_to_string(store.set_path("quality_checks")).expect("read file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let parameters = &json["expectations"]["age"][0]["parameters"];
    assert_eq!(parameters["min_value"], 0.0);
    assert_eq!(parameters["max_value"], 120.0);
}

#[test]
fn any_arity_group_reuses_existing_key_order() {
    let (_dir, store) = open_store();
    let first = ColumnGroup::new(vec!["A".into(), "B".into(), "C".into()]);
    store
        .add_multi_column("checks", &first, RuleId::MulticolumnUnique, ParamMap::new())
        .expect("first add");

    // Same columns in a different order, different parameters.
    let reordered = ColumnGroup::new(vec!["B".into(), "A".into(), "C".into()]);
    let mut params = ParamMap::new();
    params.insert("or_equal".to_string(), ParamValue::Bool(true));
    store
        .add_multi_column("checks", &reordered, RuleId::MulticolumnUnique, params)
        .expect("second add");

    let doc = store.load("checks").expect("load");
    assert_eq!(doc.expectations.len(), 1);
    assert_eq!(doc.expectations.get("A,B,C").map(Vec::len), Some(2));
    assert!(!doc.expectations.contains_key("B,A,C"));
}

#[test]
fn two_column_groups_preserve_user_order() {
    let (_dir, store) = open_store();
    let forward = ColumnGroup::new(vec!["start".into(), "end".into()]);
    let backward = ColumnGroup::new(vec!["end".into(), "start".into()]);
    store
        .add_multi_column("checks", &forward, RuleId::PairGreaterThan, ParamMap::new())
        .expect("forward add");
    store
        .add_multi_column("checks", &backward, RuleId::PairGreaterThan, ParamMap::new())
        .expect("backward add");

    let doc = store.load("checks").expect("load");
    assert!(doc.expectations.contains_key("start,end"));
    assert!(doc.expectations.contains_key("end,start"));
}

#[test]
fn identical_multi_column_rule_is_not_appended_twice() {
    let (_dir, store) = open_store();
    let group = ColumnGroup::new(vec!["A".into(), "B".into()]);
    let mut params = ParamMap::new();
    params.insert(
        "value_pairs_set".to_string(),
        ParamValue::Pairs(vec![(Scalar::Int(1), Scalar::Int(2))]),
    );
    store
        .add_multi_column("checks", &group, RuleId::PairValuesInSet, params.clone())
        .expect("first add");
    store
        .add_multi_column("checks", &group, RuleId::PairValuesInSet, params)
        .expect("second add");

    let doc = store.load("checks").expect("load");
    assert_eq!(doc.expectations.get("A,B").map(Vec::len), Some(1));
}

#[test]
fn delete_rules_prunes_drained_groups() {
    let (_dir, store) = open_store();
    store
        .add_single_column("checks", "email", RuleId::ValuesNotNull, ParamMap::new())
        .expect("add not-null");
    store
        .add_single_column("checks", "email", RuleId::ValuesNotNull, ParamMap::new())
        .expect("add not-null again");
    store
        .add_single_column("checks", "age", RuleId::ValuesUnique, ParamMap::new())
        .expect("add unique");

    // Both same-rule instances go in one zipped removal.
    store
        .delete_rules(
            "checks",
            &[(ColumnGroup::single("email"), RuleId::ValuesNotNull)],
        )
        .expect("delete");

    let doc = store.load("checks").expect("load");
    assert!(!doc.expectations.contains_key("email"));
    assert!(doc.expectations.contains_key("age"));
}

#[test]
fn prune_deletes_sets_with_no_rules_left() {
    let (_dir, store) = open_store();
    store.create_empty("abandoned").expect("create");
    store
        .add_single_column("kept", "id", RuleId::ValuesUnique, ParamMap::new())
        .expect("add rule");
    store
        .delete_rules("kept", &[(ColumnGroup::single("id"), RuleId::ValuesUnique)])
        .expect("delete");

    let pruned = store.prune_empty_sets().expect("prune");
    assert_eq!(pruned, vec!["abandoned".to_string(), "kept".to_string()]);
    assert!(store.list_names().expect("list").is_empty());
}

#[test]
fn list_names_is_sorted() {
    let (_dir, store) = open_store();
    for name in ["zeta", "alpha", "midway"] {
        store.create_empty(name).expect("create");
    }
    assert_eq!(
        store.list_names().expect("list"),
        vec!["alpha".to_string(), "midway".to_string(), "zeta".to_string()]
    );
}

#[test]
fn loading_a_missing_set_is_an_error() {
    let (_dir, store) = open_store();
    assert!(matches!(
        store.load("never_created"),
        Err(StoreError::Read { .. })
    ));
}
