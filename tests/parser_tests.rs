use recdiff::{
    parse_content, parse_file, parse_json, parse_toml, parse_yaml, read_bundle, read_collection,
    FormatHint, ParseError, RecordValue,
};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

#[test]
fn test_parse_json_primitives() {
    assert_eq!(parse_json("null").unwrap(), RecordValue::Null);
    assert_eq!(parse_json("true").unwrap(), RecordValue::Bool(true));
    assert_eq!(parse_json("42").unwrap(), RecordValue::Number(42.0));
    assert_eq!(
        parse_json(r#""hello""#).unwrap(),
        RecordValue::String("hello".to_string())
    );
}

#[test]
fn test_parse_json_object() {
    let value = parse_json(r#"{"fullName": "Admin", "tabs": ["Home", "Accounts"]}"#).unwrap();
    match value {
        RecordValue::Object(map) => {
            assert_eq!(map.len(), 2);
            assert_eq!(map["fullName"], RecordValue::String("Admin".to_string()));
            assert!(matches!(&map["tabs"], RecordValue::Array(items) if items.len() == 2));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_parse_yaml_matches_json() {
    let yaml = parse_yaml("fullName: Admin\ncustom: false\napiVersion: 58\n").unwrap();
    let json = parse_json(r#"{"apiVersion": 58, "custom": false, "fullName": "Admin"}"#).unwrap();
    assert_eq!(yaml, json);
}

#[test]
fn test_parse_yaml_nan() {
    let value = parse_yaml("threshold: .nan\n").unwrap();
    match value.get("threshold") {
        Some(RecordValue::Number(n)) => assert!(n.is_nan()),
        other => panic!("Expected NaN, got {:?}", other),
    }
}

#[test]
fn test_parse_toml_tables() {
    let value = parse_toml(
        r#"
        [Admin]
        custom = false
        loginHours = "24x7"
        "#,
    )
    .unwrap();

    let admin = value.get("Admin").unwrap();
    assert_eq!(admin.get("custom"), Some(&RecordValue::Bool(false)));
    assert_eq!(
        admin.get("loginHours"),
        Some(&RecordValue::String("24x7".to_string()))
    );
}

#[test]
fn test_parse_content_auto_detects_toml() {
    let value = parse_content("[Admin]\ncustom = true\n", FormatHint::Auto, "<stdin>").unwrap();
    assert!(value.get("Admin").is_some());
}

#[test]
fn test_parse_content_auto_detects_json() {
    let value = parse_content(r#"{"Admin": {}}"#, FormatHint::Auto, "<stdin>").unwrap();
    assert_eq!(value, RecordValue::object([("Admin", RecordValue::object::<&str, _>([]))]));
}

#[test]
fn test_parse_content_hint_errors() {
    let err = parse_content("{ not json", FormatHint::Json, "input.json").unwrap_err();
    assert!(matches!(err, ParseError::JsonError { .. }));
    assert!(err.to_string().contains("input.json"));
}

#[test]
fn test_parse_file_not_found() {
    let err = parse_file(Path::new("nonexistent_file.json")).unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound { .. }));
}

#[test]
fn test_parse_file_by_extension() {
    let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(file, "Admin:\n  custom: true").unwrap();

    let value = parse_file(file.path()).unwrap();
    assert_eq!(
        value.get("Admin").and_then(|admin| admin.get("custom")),
        Some(&RecordValue::Bool(true))
    );
}

#[test]
fn test_read_collection_fixture() {
    let collection = read_collection(Path::new("tests/fixtures/profiles_source.json")).unwrap();
    assert_eq!(collection.len(), 3);
    assert!(collection.contains_key("Admin"));
    assert!(collection.contains_key("Marketing User"));
}

#[test]
fn test_toml_and_json_collections_agree() {
    let json = read_collection(Path::new("tests/fixtures/profiles_target.json")).unwrap();
    let toml = read_collection(Path::new("tests/fixtures/profiles_target.toml")).unwrap();
    assert_eq!(json, toml);
}

#[test]
fn test_read_collection_rejects_array() {
    let err = read_collection(Path::new("tests/fixtures/not_a_collection.json")).unwrap_err();
    assert!(matches!(err, ParseError::NotACollection { .. }));
}

#[test]
fn test_read_collection_empty_document() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "null").unwrap();

    let collection = read_collection(file.path()).unwrap();
    assert!(collection.is_empty());
}

#[test]
fn test_read_bundle_fixture() {
    let bundle = read_bundle(Path::new("tests/fixtures/bundle_source.json")).unwrap();
    assert_eq!(
        bundle.keys().collect::<Vec<_>>(),
        vec!["ApexClass", "Profile", "ValidationRule"]
    );
    assert_eq!(bundle["ApexClass"].len(), 2);
}

#[test]
fn test_read_bundle_rejects_non_collection_type() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"Profile": {{}}, "ApexClass": [1, 2]}}"#).unwrap();

    let err = read_bundle(file.path()).unwrap_err();
    match err {
        ParseError::NotACollection { location, found, .. } => {
            assert_eq!(location, "ApexClass");
            assert_eq!(found, "array");
        }
        other => panic!("Expected NotACollection, got {:?}", other),
    }
}
