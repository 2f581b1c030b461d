use recdiff::tree::{format_number, format_path, Defect};
use recdiff::{RecordCollection, RecordValue, Shape};
use serde_json::json;

#[test]
fn test_shapes() {
    assert_eq!(RecordValue::Null.shape(), Shape::Primitive);
    assert_eq!(RecordValue::Bool(true).shape(), Shape::Primitive);
    assert_eq!(RecordValue::Number(1.0).shape(), Shape::Primitive);
    assert_eq!(RecordValue::String("x".into()).shape(), Shape::Primitive);
    assert_eq!(RecordValue::Array(vec![]).shape(), Shape::Sequence);
    assert_eq!(RecordValue::object::<&str, _>([]).shape(), Shape::Mapping);
}

#[test]
fn test_type_names() {
    assert_eq!(RecordValue::Null.type_name(), "null");
    assert_eq!(RecordValue::Bool(false).type_name(), "boolean");
    assert_eq!(RecordValue::Number(0.5).type_name(), "number");
    assert_eq!(RecordValue::String(String::new()).type_name(), "string");
    assert_eq!(RecordValue::Array(vec![]).type_name(), "array");
    assert_eq!(RecordValue::object::<&str, _>([]).type_name(), "object");
}

#[test]
fn test_from_json() {
    let value = RecordValue::from(json!({
        "name": "Admin",
        "custom": false,
        "apiVersion": 58,
        "tags": ["a", null],
    }));

    assert_eq!(value.get("name"), Some(&RecordValue::String("Admin".into())));
    assert_eq!(value.get("custom"), Some(&RecordValue::Bool(false)));
    assert_eq!(value.get("apiVersion"), Some(&RecordValue::Number(58.0)));
    assert_eq!(
        value.get("tags"),
        Some(&RecordValue::Array(vec![
            RecordValue::String("a".into()),
            RecordValue::Null
        ]))
    );
    assert_eq!(value.get("missing"), None);
}

#[test]
fn test_to_json_keeps_integers_integral() {
    let value = RecordValue::object([
        ("count", RecordValue::Number(3.0)),
        ("ratio", RecordValue::Number(0.25)),
    ]);
    assert_eq!(value.to_json().to_string(), r#"{"count":3,"ratio":0.25}"#);
}

#[test]
fn test_truthiness() {
    assert!(!RecordValue::Null.is_truthy());
    assert!(!RecordValue::Bool(false).is_truthy());
    assert!(!RecordValue::Number(0.0).is_truthy());
    assert!(!RecordValue::String(String::new()).is_truthy());
    assert!(RecordValue::Number(-1.0).is_truthy());
    assert!(RecordValue::String("0".into()).is_truthy());
    assert!(RecordValue::Array(vec![]).is_truthy());
}

#[test]
fn test_find_defect_reports_path() {
    let value = RecordValue::object([(
        "rules",
        RecordValue::Array(vec![
            RecordValue::Number(1.0),
            RecordValue::object([("weight", RecordValue::Number(f64::INFINITY))]),
        ]),
    )]);

    let (defect, path) = value.find_defect(512).unwrap();
    assert_eq!(defect, Defect::NonFiniteNumber);
    assert_eq!(format_path(&path), "rules[1].weight");
}

#[test]
fn test_find_defect_depth_limit() {
    let mut value = RecordValue::Number(1.0);
    for _ in 0..5 {
        value = RecordValue::object([("inner", value)]);
    }

    assert!(value.find_defect(5).is_none());
    let (defect, path) = value.find_defect(4).unwrap();
    assert_eq!(defect, Defect::TooDeep);
    assert_eq!(path.len(), 5);
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(58.0), "58");
    assert_eq!(format_number(-2.0), "-2");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_format_path() {
    assert_eq!(format_path(&[]), "(root)");
    assert_eq!(
        format_path(&["user".to_string(), "name".to_string()]),
        "user.name"
    );
    assert_eq!(
        format_path(&["items".to_string(), "[0]".to_string(), "id".to_string()]),
        "items[0].id"
    );
}

#[test]
fn test_collection_basics() {
    let mut collection = RecordCollection::new();
    assert!(collection.is_empty());

    collection.insert("Sales", RecordValue::Bool(true));
    collection.insert("Admin", RecordValue::Bool(false));

    assert_eq!(collection.len(), 2);
    assert!(collection.contains_key("Admin"));
    assert!(!collection.contains_key("Guest"));
    assert_eq!(collection.get("Sales"), Some(&RecordValue::Bool(true)));

    let keys: Vec<&String> = collection.keys().collect();
    assert_eq!(keys, vec!["Admin", "Sales"]);
}

#[test]
fn test_collection_insert_replaces() {
    let mut collection: RecordCollection = [("A", RecordValue::Number(1.0))].into_iter().collect();
    let previous = collection.insert("A", RecordValue::Number(2.0));

    assert_eq!(previous, Some(RecordValue::Number(1.0)));
    assert_eq!(collection.get("A"), Some(&RecordValue::Number(2.0)));
}
