use recdiff::{
    compare_collections, DiffConfig, ParseError, RecdiffError, RecordCollection, RecordValue,
    StructuralError,
};

#[test]
fn test_parse_error_display() {
    let err = ParseError::file_not_found("test.json");
    assert_eq!(err.to_string(), "File not found: test.json");
}

#[test]
fn test_unknown_format_error() {
    let err = ParseError::unknown_format("/path/to/file.txt");
    assert!(err.to_string().contains("Could not detect file format"));
    assert!(err.to_string().contains("/path/to/file.txt"));
}

#[test]
fn test_not_a_collection_error() {
    let err = ParseError::not_a_collection("bundle.json", "Profile", "array");
    assert_eq!(
        err.to_string(),
        "Expected a record collection in bundle.json at 'Profile', found array"
    );
}

#[test]
fn test_recdiff_error_from_parse_error() {
    let parse_err = ParseError::file_not_found("test.json");
    let err: RecdiffError = parse_err.into();
    assert!(matches!(err, RecdiffError::Parse(_)));
    assert_eq!(err.to_string(), "File not found: test.json");
}

#[test]
fn test_config_error() {
    let err = RecdiffError::config("Invalid option");
    assert!(err.to_string().contains("Invalid configuration"));
    assert!(err.to_string().contains("Invalid option"));
}

#[test]
fn test_structural_error_is_scoped_to_record() {
    let source: RecordCollection = [
        ("Bad", RecordValue::object([("x", RecordValue::Number(f64::NAN))])),
        ("Good", RecordValue::object([("x", RecordValue::Number(1.0))])),
    ]
    .into_iter()
    .collect();
    let target: RecordCollection = [
        ("Bad", RecordValue::object([("x", RecordValue::Number(1.0))])),
        ("Good", RecordValue::object([("x", RecordValue::Number(2.0))])),
    ]
    .into_iter()
    .collect();

    let comparison = compare_collections(&source, &target, &DiffConfig::default());

    assert_eq!(comparison.differences.len(), 1);
    assert_eq!(comparison.differences[0].key, "Good");
    assert_eq!(
        comparison.failures,
        vec![StructuralError::NonFiniteNumber {
            key: "Bad".to_string(),
            path: "x".to_string(),
        }]
    );
    assert_eq!(comparison.failures[0].key(), "Bad");
    assert_eq!(
        comparison.failures[0].to_string(),
        "Record Bad: non-finite number at x"
    );
    assert!(!comparison.is_empty());
}

#[test]
fn test_depth_exceeded_error() {
    let mut value = RecordValue::Bool(true);
    for _ in 0..4 {
        value = RecordValue::object([("level", value)]);
    }
    let source: RecordCollection = [("Deep", value)].into_iter().collect();
    let target = RecordCollection::new();

    let config = DiffConfig {
        max_depth: 2,
        ..Default::default()
    };
    let comparison = compare_collections(&source, &target, &config);

    assert!(comparison.differences.is_empty());
    assert_eq!(comparison.failures.len(), 1);
    assert!(matches!(
        &comparison.failures[0],
        StructuralError::DepthExceeded { key, limit: 2, .. } if key == "Deep"
    ));
    assert!(comparison.failures[0]
        .to_string()
        .contains("nesting deeper than 2 levels"));
}
