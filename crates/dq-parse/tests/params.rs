//! Unit tests for parameter parsing policies.

use dq_model::{ParamKind, ParamValue, Scalar};
use dq_parse::{ParserOptions, RawValue, matches_pair_grammar, parse, range_is_ordered};

fn parse_text(kind: ParamKind, raw: &str) -> Option<ParamValue> {
    parse(kind, RawValue::Text(raw), ParserOptions::default())
}

#[test]
fn type_name_accepts_only_supported_types() {
    for name in ["int", "bool", "float", "str"] {
        assert_eq!(
            parse_text(ParamKind::TypeName, name),
            Some(ParamValue::Text(name.to_string()))
        );
    }
    assert_eq!(parse_text(ParamKind::TypeName, "decimal"), None);
    assert_eq!(parse_text(ParamKind::TypeName, ""), None);
}

#[test]
fn length_is_kept_as_text_by_default() {
    assert_eq!(
        parse_text(ParamKind::IntegerText, "12"),
        Some(ParamValue::Text("12".to_string()))
    );
    assert_eq!(parse_text(ParamKind::IntegerText, "12.5"), None);
    assert_eq!(parse_text(ParamKind::IntegerText, "-3"), None);
    assert_eq!(parse_text(ParamKind::IntegerText, "abc"), None);
}

#[test]
fn length_converts_when_opted_in() {
    let options = ParserOptions {
        convert_length_to_int: true,
    };
    assert_eq!(
        parse(ParamKind::IntegerText, RawValue::Text("12"), options),
        Some(ParamValue::Int(12))
    );
}

#[test]
fn value_list_converts_tokens_and_keeps_duplicates() {
    assert_eq!(
        parse_text(ParamKind::ValueList, "1, 2.5, red, 1"),
        Some(ParamValue::List(vec![
            Scalar::Int(1),
            Scalar::Float(2.5),
            Scalar::Text("red".to_string()),
            Scalar::Int(1),
        ]))
    );
}

#[test]
fn range_accepts_comma_decimal_separator() {
    assert_eq!(
        parse_text(ParamKind::Range, "3,5"),
        Some(ParamValue::Float(3.5))
    );
    assert_eq!(parse_text(ParamKind::Range, "ten"), None);
}

#[test]
fn range_pair_rejected_when_min_exceeds_max() {
    let min = parse_text(ParamKind::Range, "10").expect("min parses");
    let max = parse_text(ParamKind::Range, "5").expect("max parses");
    assert!(!range_is_ordered(&min, &max));
    assert!(range_is_ordered(&max, &min));
}

#[test]
fn toggle_reflects_selection_presence() {
    let checked = vec!["or equal".to_string()];
    assert_eq!(
        parse(
            ParamKind::Toggle,
            RawValue::Selection(&checked),
            ParserOptions::default()
        ),
        Some(ParamValue::Bool(true))
    );
    assert_eq!(
        parse(
            ParamKind::Toggle,
            RawValue::Selection(&[]),
            ParserOptions::default()
        ),
        Some(ParamValue::Bool(false))
    );
}

#[test]
fn empty_column_list_is_invalid() {
    assert_eq!(
        parse(
            ParamKind::ColumnList,
            RawValue::Selection(&[]),
            ParserOptions::default()
        ),
        None
    );
}

#[test]
fn pair_list_round_trips_integer_pairs() {
    let pairs = vec![(1_i64, 2_i64), (3, 4), (10, 20)];
    let encoded = pairs
        .iter()
        .map(|(a, b)| format!("[{a},{b}]"))
        .collect::<Vec<_>>()
        .join(",");
    let parsed = parse_text(ParamKind::ValuePairList, &encoded).expect("valid pair list");
    let expected = ParamValue::Pairs(
        pairs
            .into_iter()
            .map(|(a, b)| (Scalar::Int(a), Scalar::Int(b)))
            .collect(),
    );
    assert_eq!(parsed, expected);
}

#[test]
fn pair_list_tolerates_spaces_trailing_commas_and_quotes() {
    assert_eq!(
        parse_text(ParamKind::ValuePairList, " [1, 'ab'], [2.5, cd] , "),
        Some(ParamValue::Pairs(vec![
            (Scalar::Int(1), Scalar::Text("ab".to_string())),
            (Scalar::Float(2.5), Scalar::Text("cd".to_string())),
        ]))
    );
}

#[test]
fn pair_grammar_rejects_malformed_input() {
    // Unbalanced brackets.
    assert!(!matches_pair_grammar("[1,2"));
    assert!(!matches_pair_grammar("1,2]"));
    // Nested brackets.
    assert!(!matches_pair_grammar("[[1,2]]"));
    // Fewer than two values per pair.
    assert!(!matches_pair_grammar("[1]"));
    assert!(!matches_pair_grammar("[12]"));
    // Too many values per pair.
    assert!(!matches_pair_grammar("[1,2,3]"));
    // Bare values between pairs and empty input.
    assert!(!matches_pair_grammar("[1,2],3,[4,5]"));
    assert!(!matches_pair_grammar(""));
    // Trailing separator with nothing after it.
    assert!(!matches_pair_grammar("[1,2],"));
}

#[test]
fn pair_grammar_accepts_wellformed_input() {
    assert!(matches_pair_grammar("[1,2]"));
    assert!(matches_pair_grammar("[1,2],[3,4]"));
    assert!(matches_pair_grammar("[10,200],[ab,cd]"));
}

#[test]
fn malformed_pair_lists_parse_to_none() {
    for raw in ["[1,2", "[[1,2]]", "[1]", "", ","] {
        assert_eq!(parse_text(ParamKind::ValuePairList, raw), None, "raw: {raw:?}");
    }
}

#[test]
fn parsing_is_deterministic() {
    for raw in ["[1,2],[3,4]", "1,2,3", "3,5", "12", "int"] {
        for kind in [
            ParamKind::ValuePairList,
            ParamKind::ValueList,
            ParamKind::Range,
            ParamKind::IntegerText,
            ParamKind::TypeName,
        ] {
            assert_eq!(parse_text(kind, raw), parse_text(kind, raw));
        }
    }
}
